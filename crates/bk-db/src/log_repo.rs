use crate::util::{from_rfc3339, to_rfc3339, DbError};
use bk_core::types::{LogId, NewStudyLog, StudyLogRecord, UserId};
use chrono::Utc;
use rusqlite::Connection;
use std::str::FromStr;

pub struct LogRepo<'a> {
    conn: &'a Connection,
}

impl<'a> LogRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Mints the id, stamps `createdAt`, and inserts. Records are immutable
    /// after this; no update or delete exists.
    pub fn append(&self, input: NewStudyLog) -> Result<StudyLogRecord, DbError> {
        let record = StudyLogRecord {
            id: LogId::generate(),
            user_id: input.user_id,
            user_name: input.user_name,
            subject: input.subject,
            content: input.content,
            time: input.time,
            created_at: Some(Utc::now()),
        };

        let sql = "INSERT INTO study_logs (id, user_id, user_name, subject, content, time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
        self.conn.execute(
            sql,
            (
                record.id.as_str(),
                record.user_id.as_str(),
                record.user_name.clone(),
                record.subject.clone(),
                record.content.clone(),
                record.time,
                record.created_at.map(|at| to_rfc3339(&at)),
            ),
        )?;
        Ok(record)
    }

    /// Every user's records, newest first. Callers must not rely on the
    /// order; it only mirrors what the original backend query did.
    pub fn list_all(&self) -> Result<Vec<StudyLogRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, user_name, subject, content, time, created_at FROM study_logs ORDER BY created_at DESC",
        )?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(decode_row(row)?);
        }
        Ok(records)
    }
}

/// Validates a raw document before it reaches the engine: a bad id,
/// unparseable timestamp, or negative duration never leaves the adapter.
fn decode_row(row: &rusqlite::Row<'_>) -> Result<StudyLogRecord, DbError> {
    let id: String = row.get(0)?;
    let id = LogId::from_str(&id).map_err(|_| DbError::InvalidId { value: id })?;
    let user_id: String = row.get(1)?;
    let time: i64 = row.get(5)?;
    // same rule as write-side validation: durations are strictly positive
    if time <= 0 {
        return Err(DbError::InvalidDuration { value: time });
    }
    let created_at: Option<String> = row.get(6)?;
    let created_at = created_at.as_deref().map(from_rfc3339).transpose()?;

    Ok(StudyLogRecord {
        id,
        user_id: UserId::new(user_id),
        user_name: row.get(2)?,
        subject: row.get(3)?,
        content: row.get(4)?,
        time,
        created_at,
    })
}
