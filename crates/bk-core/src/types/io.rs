use crate::types::ids::UserId;
use serde::{Deserialize, Serialize};

/// Input for appending a study-log record. The store assigns the id and the
/// `createdAt` timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyLog {
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub subject: Option<String>,
    pub content: String,
    pub time: i64,
}

/// Input for creating a study task. The store assigns the id; `completed`
/// always starts false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudyTask {
    pub user_id: UserId,
    pub subject: String,
    pub topic: String,
}
