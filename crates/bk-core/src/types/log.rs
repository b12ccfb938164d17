use crate::types::ids::{LogId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed study session. Immutable once created; there is no update
/// or delete operation for records.
///
/// Field names follow the external document schema (`userId`, `createdAt`,
/// ...) so documents survive a store swap field-for-field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyLogRecord {
    pub id: LogId,
    pub user_id: UserId,
    /// Display-name snapshot captured at write time; may be stale or absent.
    pub user_name: Option<String>,
    pub subject: Option<String>,
    pub content: String,
    /// Duration in minutes. Expected positive; the adapter validates on
    /// write, but the engine still degrades gracefully on bad stored data.
    pub time: i64,
    /// Server-assigned. Absent between an optimistic local insert and the
    /// store's confirmation.
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LogId;
    use chrono::TimeZone;

    // The document field names are the compatibility contract with the
    // external store; a rename here would strand existing documents.
    #[test]
    fn serializes_with_document_field_names() {
        let record = StudyLogRecord {
            id: LogId::generate(),
            user_id: UserId::new("u1"),
            user_name: Some("Aiko".to_string()),
            subject: Some("Math".to_string()),
            content: "integrals".to_string(),
            time: 30,
            created_at: Some(Utc.with_ymd_and_hms(2025, 7, 10, 9, 0, 0).unwrap()),
        };
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();
        for key in ["id", "userId", "userName", "subject", "content", "time", "createdAt"] {
            assert!(object.contains_key(key), "missing document field {key}");
        }
    }
}
