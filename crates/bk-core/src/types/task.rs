use crate::types::ids::{TaskId, UserId};
use serde::{Deserialize, Serialize};

/// A pending or completed unit of study, distinct from a log record.
/// Created with `completed = false`, mutated only by toggling completion,
/// never deleted. Tasks belong to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyTask {
    pub id: TaskId,
    pub user_id: UserId,
    pub subject: String,
    pub topic: String,
    pub completed: bool,
}
