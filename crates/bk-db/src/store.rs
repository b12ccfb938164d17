use crate::log_repo::LogRepo;
use crate::schema;
use crate::task_repo::TaskRepo;
use bk_core::error::StoreError;
use bk_core::store::StudyStore;
use bk_core::types::{NewStudyLog, NewStudyTask, StudyLogRecord, StudyTask, TaskId, UserId};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Embedded document-store adapter. Stands in for the external managed
/// backend behind the same `StudyStore` boundary; the engine cannot tell
/// them apart. The connection sits behind a mutex because the trait takes
/// `&self` from async callers.
pub struct DbStore {
    conn: Mutex<Connection>,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = schema::open(path).map_err(unavailable)?;
        Ok(Self::new(conn))
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = schema::open_in_memory().map_err(unavailable)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Unavailable {
            reason: "connection poisoned".to_string(),
        })
    }
}

fn unavailable(err: impl ToString) -> StoreError {
    StoreError::Unavailable {
        reason: err.to_string(),
    }
}

impl StudyStore for DbStore {
    async fn fetch_all_study_logs(&self) -> Result<Vec<StudyLogRecord>, StoreError> {
        let conn = self.lock()?;
        LogRepo::new(&conn).list_all().map_err(unavailable)
    }

    async fn fetch_tasks_for_user(&self, user: &UserId) -> Result<Vec<StudyTask>, StoreError> {
        let conn = self.lock()?;
        TaskRepo::new(&conn).list_for_user(user).map_err(unavailable)
    }

    async fn append_study_log(&self, input: NewStudyLog) -> Result<StudyLogRecord, StoreError> {
        let conn = self.lock()?;
        LogRepo::new(&conn).append(input).map_err(unavailable)
    }

    async fn append_task(&self, input: NewStudyTask) -> Result<StudyTask, StoreError> {
        let conn = self.lock()?;
        TaskRepo::new(&conn).append(input).map_err(unavailable)
    }

    async fn update_task_completion(
        &self,
        id: &TaskId,
        completed: bool,
    ) -> Result<(), StoreError> {
        let conn = self.lock()?;
        TaskRepo::new(&conn)
            .set_completed(id, completed)
            .map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_core::error::{IdentityError, LogError, TaskError, TrackerError};
    use bk_core::identity::IdentitySnapshot;
    use bk_core::{Tracker, TrackerConfig};
    use chrono::Utc;

    fn setup() -> Tracker<DbStore> {
        let store = DbStore::in_memory().unwrap();
        Tracker::new(store, TrackerConfig::default()).unwrap()
    }

    fn aiko() -> IdentitySnapshot {
        IdentitySnapshot::signed_in(UserId::new("u_aiko"), Some("Aiko".to_string()))
    }

    fn ben() -> IdentitySnapshot {
        IdentitySnapshot::signed_in(UserId::new("u_ben"), Some("Ben".to_string()))
    }

    #[tokio::test]
    async fn record_then_overview() {
        let tracker = setup();
        let logs = tracker.logs();

        logs.record(&aiko(), Some("Math".to_string()), "integrals".to_string(), 30)
            .await
            .unwrap();
        logs.record(&aiko(), None, "flashcards".to_string(), 40)
            .await
            .unwrap();
        logs.record(&ben(), Some("English".to_string()), "essay".to_string(), 100)
            .await
            .unwrap();

        let overview = logs.overview(&aiko(), Utc::now()).await.unwrap();
        assert_eq!(overview.total_minutes, 70);
        assert_eq!(overview.today_minutes, 70);
        assert_eq!(overview.weekly_total, 70);
        assert_eq!(overview.weekly_series.len(), 7);
        assert_eq!(overview.weekly_achievement_percent, 11.7);
        assert_eq!(overview.streak_days, 1);

        // ranking spans all users and groups by display name
        assert_eq!(overview.ranking[0].label, "Ben");
        assert_eq!(overview.ranking[0].minutes, 100);
        assert_eq!(overview.ranking[1].label, "Aiko");

        let math = overview
            .subject_totals
            .iter()
            .find(|total| total.subject == "Math")
            .unwrap();
        assert_eq!(math.minutes, 30);

        // calendar data: both of today's sessions on one date tile
        assert_eq!(overview.daily_totals.len(), 1);
        assert_eq!(overview.daily_totals[0].minutes, 70);
    }

    #[tokio::test]
    async fn records_list_is_per_user_newest_first() {
        let tracker = setup();
        let logs = tracker.logs();
        logs.record(&aiko(), None, "first".to_string(), 10).await.unwrap();
        logs.record(&aiko(), None, "second".to_string(), 20).await.unwrap();
        logs.record(&ben(), None, "other".to_string(), 30).await.unwrap();

        let mine = logs.for_user(&aiko()).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].content, "second");
        assert!(mine.iter().all(|record| record.user_id == UserId::new("u_aiko")));
    }

    #[tokio::test]
    async fn task_add_toggle_and_group() {
        let tracker = setup();
        let tasks = tracker.tasks();

        let task = tasks
            .add(&aiko(), "Math".to_string(), "Algebra".to_string())
            .await
            .unwrap();
        assert!(!task.completed);

        let updated = tasks.toggle(&aiko(), &task.id).await.unwrap();
        assert!(updated.iter().find(|t| t.id == task.id).unwrap().completed);

        let groups = tasks.completed_by_subject(&aiko()).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, "Math");
        assert_eq!(groups[0].1[0].topic, "Algebra");
        assert!(tasks.incomplete(&aiko()).await.unwrap().is_empty());

        // a second toggle restores the original state in the store too
        tasks.toggle(&aiko(), &task.id).await.unwrap();
        let listed = tasks.list(&aiko()).await.unwrap();
        assert!(!listed[0].completed);
    }

    #[tokio::test]
    async fn toggle_unknown_or_foreign_task_is_not_found() {
        let tracker = setup();
        let tasks = tracker.tasks();
        let theirs = tasks
            .add(&ben(), "English".to_string(), "Vocab".to_string())
            .await
            .unwrap();

        // Ben's task is invisible to Aiko's collection
        let err = tasks.toggle(&aiko(), &theirs.id).await.unwrap_err();
        assert!(matches!(err, TrackerError::Task(TaskError::NotFound)));
        assert!(tasks.list(&aiko()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn validation_happens_before_any_write() {
        let tracker = setup();

        let err = tracker
            .logs()
            .record(&aiko(), None, "  ".to_string(), 30)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Log(LogError::InvalidInput { .. })));

        let err = tracker
            .logs()
            .record(&aiko(), None, "cramming".to_string(), 0)
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Log(LogError::InvalidInput { .. })));

        let err = tracker
            .tasks()
            .add(&aiko(), String::new(), "Algebra".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, TrackerError::Task(TaskError::InvalidInput { .. })));

        assert!(tracker.logs().for_user(&aiko()).await.unwrap().is_empty());
        assert!(tracker.tasks().list(&aiko()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn signed_out_callers_are_rejected() {
        let tracker = setup();
        let anon = IdentitySnapshot::signed_out();

        let err = tracker.logs().overview(&anon, Utc::now()).await.unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Identity(IdentityError::SignedOut)
        ));

        // the leaderboard alone does not need a signed-in user
        assert!(tracker.logs().leaderboard().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_documents_fail_at_the_adapter_boundary() {
        let store = DbStore::in_memory().unwrap();
        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO study_logs (id, user_id, content, time, created_at) VALUES ('log_00000000000000000000000000', 'u1', 'bad', -5, NULL)",
                [],
            )
            .unwrap();
        }
        let err = store.fetch_all_study_logs().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn zero_duration_documents_fail_at_the_adapter_boundary() {
        let store = DbStore::in_memory().unwrap();
        {
            let conn = store.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO study_logs (id, user_id, content, time, created_at) VALUES ('log_00000000000000000000000001', 'u1', 'noop', 0, NULL)",
                [],
            )
            .unwrap();
        }
        let err = store.fetch_all_study_logs().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }

    #[tokio::test]
    async fn on_disk_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study.db");

        {
            let tracker = Tracker::new(DbStore::open(&path).unwrap(), TrackerConfig::default())
                .unwrap();
            tracker
                .logs()
                .record(&aiko(), None, "persisted".to_string(), 15)
                .await
                .unwrap();
        }

        let tracker =
            Tracker::new(DbStore::open(&path).unwrap(), TrackerConfig::default()).unwrap();
        let mine = tracker.logs().for_user(&aiko()).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].content, "persisted");
        assert!(mine[0].created_at.is_some());
    }
}
