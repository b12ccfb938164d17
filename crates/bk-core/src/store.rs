use crate::error::StoreError;
use crate::types::{NewStudyLog, NewStudyTask, StudyLogRecord, StudyTask, TaskId, UserId};

/// Boundary to the external document store. Every call either resolves with
/// complete data or fails with [`StoreError::Unavailable`]: one terminal
/// outcome per call, no partial results. Retry policy, if any, lives in the
/// adapter; the core never retries.
///
/// `fetch_all_study_logs` spans every user (the leaderboard needs that) and
/// makes no ordering promise; the aggregation engine must not assume one.
#[allow(async_fn_in_trait)]
pub trait StudyStore {
    async fn fetch_all_study_logs(&self) -> Result<Vec<StudyLogRecord>, StoreError>;

    async fn fetch_tasks_for_user(&self, user: &UserId) -> Result<Vec<StudyTask>, StoreError>;

    /// Appends a record; the store assigns the id and `createdAt`.
    async fn append_study_log(&self, input: NewStudyLog) -> Result<StudyLogRecord, StoreError>;

    /// Creates a task with `completed = false`; the store assigns the id.
    async fn append_task(&self, input: NewStudyTask) -> Result<StudyTask, StoreError>;

    /// Last write wins for concurrent toggles of the same task; there is no
    /// version field in the document schema.
    async fn update_task_completion(
        &self,
        id: &TaskId,
        completed: bool,
    ) -> Result<(), StoreError>;
}
