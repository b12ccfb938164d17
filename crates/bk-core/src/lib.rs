pub mod aggregate;
pub mod config;
pub mod error;
pub mod identity;
pub mod store;
pub mod tasks;
pub mod tracker;
pub mod validation;

pub mod types;

pub use crate::config::TrackerConfig;
pub use crate::error::TrackerError;
pub use crate::identity::{IdentityFeed, IdentitySnapshot};
pub use crate::store::StudyStore;
pub use crate::tracker::Tracker;
