use crate::util::DbError;
use bk_core::types::{NewStudyTask, StudyTask, TaskId, UserId};
use rusqlite::Connection;
use std::str::FromStr;

pub struct TaskRepo<'a> {
    conn: &'a Connection,
}

impl<'a> TaskRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn append(&self, input: NewStudyTask) -> Result<StudyTask, DbError> {
        let task = StudyTask {
            id: TaskId::generate(),
            user_id: input.user_id,
            subject: input.subject,
            topic: input.topic,
            completed: false,
        };

        let sql = "INSERT INTO study_tasks (id, user_id, subject, topic, completed) VALUES (?1, ?2, ?3, ?4, ?5)";
        self.conn.execute(
            sql,
            (
                task.id.as_str(),
                task.user_id.as_str(),
                task.subject.clone(),
                task.topic.clone(),
                i64::from(task.completed),
            ),
        )?;
        Ok(task)
    }

    pub fn list_for_user(&self, user: &UserId) -> Result<Vec<StudyTask>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, subject, topic, completed FROM study_tasks WHERE user_id = ?1",
        )?;
        let mut rows = stmt.query([user.as_str()])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let id = TaskId::from_str(&id).map_err(|_| DbError::InvalidId { value: id })?;
            let user_id: String = row.get(1)?;
            let completed: i64 = row.get(4)?;
            tasks.push(StudyTask {
                id,
                user_id: UserId::new(user_id),
                subject: row.get(2)?,
                topic: row.get(3)?,
                completed: completed != 0,
            });
        }
        Ok(tasks)
    }

    /// Last write wins; racing toggles of the same task are accepted.
    pub fn set_completed(&self, id: &TaskId, completed: bool) -> Result<(), DbError> {
        self.conn.execute(
            "UPDATE study_tasks SET completed = ?2 WHERE id = ?1",
            (id.as_str(), i64::from(completed)),
        )?;
        Ok(())
    }
}
