//! The read-aggregate glue the pages perform: fetch from the store, run the
//! pure engine, hand a snapshot to whoever renders it. The tracker holds no
//! state between calls besides its configuration and the store handle.

use crate::aggregate;
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::identity::IdentitySnapshot;
use crate::store::StudyStore;
use crate::tasks;
use crate::types::{
    NewStudyLog, NewStudyTask, Overview, RankingEntry, StudyLogRecord, StudyTask, TaskId,
};
use crate::validation::{validate_new_log, validate_new_task};
use chrono::{DateTime, Utc};

pub struct Tracker<S: StudyStore> {
    store: S,
    config: TrackerConfig,
}

impl<S: StudyStore> Tracker<S> {
    /// Fails up front on an invalid configuration (e.g. a non-positive
    /// weekly goal) instead of at the first percentage computation.
    pub fn new(store: S, config: TrackerConfig) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    pub fn logs(&self) -> LogsApi<'_, S> {
        LogsApi { core: self }
    }

    pub fn tasks(&self) -> TasksApi<'_, S> {
        TasksApi { core: self }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub struct LogsApi<'a, S: StudyStore> {
    core: &'a Tracker<S>,
}

impl<'a, S: StudyStore> LogsApi<'a, S> {
    /// Records a finished study session for the signed-in user. The display
    /// name is snapshotted into the record at write time.
    pub async fn record(
        &self,
        identity: &IdentitySnapshot,
        subject: Option<String>,
        content: String,
        time: i64,
    ) -> Result<StudyLogRecord, TrackerError> {
        let user = identity.require_user()?;
        let input = NewStudyLog {
            user_id: user.clone(),
            user_name: identity.display_name.clone(),
            subject,
            content,
            time,
        };
        validate_new_log(&input)?;
        Ok(self.core.store.append_study_log(input).await?)
    }

    /// The full stats snapshot for the signed-in user, recomputed from
    /// scratch. The ranking spans all users; everything else is scoped to
    /// the snapshot's user.
    pub async fn overview(
        &self,
        identity: &IdentitySnapshot,
        now: DateTime<Utc>,
    ) -> Result<Overview, TrackerError> {
        let user = identity.require_user()?;
        let config = &self.core.config;
        let records = self.core.store.fetch_all_study_logs().await?;

        let weekly_series = aggregate::weekly_series(&records, user, now, config.day_boundary);
        let weekly_total = aggregate::weekly_total(&weekly_series);
        let weekly_achievement_percent =
            aggregate::achievement_percent(weekly_total, config.weekly_goal_minutes)?;

        Ok(Overview {
            total_minutes: aggregate::total_minutes(&records, user),
            today_minutes: aggregate::today_minutes(&records, user, now, config.day_boundary),
            weekly_series,
            weekly_total,
            weekly_achievement_percent,
            streak_days: aggregate::streak_days(&records, user, now, config.day_boundary),
            ranking: aggregate::ranking(&records, config.ranking_label),
            subject_totals: aggregate::subject_totals(
                &records,
                user,
                &config.subjects,
                config.subject_policy,
            ),
            daily_totals: aggregate::daily_totals(&records, user, config.day_boundary),
        })
    }

    /// The signed-in user's records, newest first. Unconfirmed records
    /// (no `createdAt` yet) sort last.
    pub async fn for_user(
        &self,
        identity: &IdentitySnapshot,
    ) -> Result<Vec<StudyLogRecord>, TrackerError> {
        let user = identity.require_user()?;
        let mut records: Vec<StudyLogRecord> = self
            .core
            .store
            .fetch_all_study_logs()
            .await?
            .into_iter()
            .filter(|record| &record.user_id == user)
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Cross-user leaderboard, viewable regardless of sign-in state.
    pub async fn leaderboard(&self) -> Result<Vec<RankingEntry>, TrackerError> {
        let records = self.core.store.fetch_all_study_logs().await?;
        Ok(aggregate::ranking(&records, self.core.config.ranking_label))
    }
}

pub struct TasksApi<'a, S: StudyStore> {
    core: &'a Tracker<S>,
}

impl<'a, S: StudyStore> TasksApi<'a, S> {
    pub async fn list(&self, identity: &IdentitySnapshot) -> Result<Vec<StudyTask>, TrackerError> {
        let user = identity.require_user()?;
        Ok(self.core.store.fetch_tasks_for_user(user).await?)
    }

    pub async fn add(
        &self,
        identity: &IdentitySnapshot,
        subject: String,
        topic: String,
    ) -> Result<StudyTask, TrackerError> {
        let user = identity.require_user()?;
        let input = NewStudyTask {
            user_id: user.clone(),
            subject,
            topic,
        };
        validate_new_task(&input)?;
        Ok(self.core.store.append_task(input).await?)
    }

    /// Flips completion on one task and returns the user's updated
    /// collection. The flip is validated against the fetched collection
    /// first, so a stale or foreign id fails with `NotFound` before any
    /// write reaches the store.
    pub async fn toggle(
        &self,
        identity: &IdentitySnapshot,
        id: &TaskId,
    ) -> Result<Vec<StudyTask>, TrackerError> {
        let current = self.list(identity).await?;
        let updated = tasks::toggle_completion(&current, id)?;
        let completed = updated
            .iter()
            .find(|task| &task.id == id)
            .map(|task| task.completed)
            .unwrap_or_default();
        self.core.store.update_task_completion(id, completed).await?;
        Ok(updated)
    }

    pub async fn incomplete(
        &self,
        identity: &IdentitySnapshot,
    ) -> Result<Vec<StudyTask>, TrackerError> {
        Ok(tasks::incomplete_tasks(&self.list(identity).await?))
    }

    pub async fn completed_by_subject(
        &self,
        identity: &IdentitySnapshot,
    ) -> Result<Vec<(String, Vec<StudyTask>)>, TrackerError> {
        Ok(tasks::completed_by_subject(&self.list(identity).await?))
    }
}
