use crate::error::IdentityError;
use crate::types::UserId;
use tokio::sync::watch;

/// The current sign-in state as delivered by the external identity
/// provider. Passed into the engine explicitly at call time; there is no
/// process-wide session singleton.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentitySnapshot {
    pub user_id: Option<UserId>,
    pub display_name: Option<String>,
}

impl IdentitySnapshot {
    pub fn signed_in(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id: Some(user_id),
            display_name,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    /// The signed-in user id, or `IdentityError::SignedOut`.
    pub fn require_user(&self) -> Result<&UserId, IdentityError> {
        self.user_id.as_ref().ok_or(IdentityError::SignedOut)
    }
}

/// Notification channel for identity transitions. The provider adapter
/// publishes a snapshot at startup and again on every sign-in/sign-out;
/// consumers only ever need the latest value, so this is a watch channel
/// rather than a broadcast.
#[derive(Clone)]
pub struct IdentityFeed {
    sender: watch::Sender<IdentitySnapshot>,
}

impl IdentityFeed {
    pub fn new(initial: IdentitySnapshot) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<IdentitySnapshot> {
        self.sender.subscribe()
    }

    pub fn publish(&self, snapshot: IdentitySnapshot) {
        let _ = self.sender.send(snapshot);
    }

    pub fn current(&self) -> IdentitySnapshot {
        self.sender.borrow().clone()
    }
}
