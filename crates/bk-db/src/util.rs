use chrono::{DateTime, Utc};
use thiserror::Error;

/// Row-level failures surfaced by the repos. The store adapter folds all of
/// them into `StoreError::Unavailable` at the trait boundary.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("invalid duration: {value} minutes")]
    InvalidDuration { value: i64 },
    #[error("invalid id: {value}")]
    InvalidId { value: String },
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Sqlite {
            message: err.to_string(),
        }
    }
}

pub fn to_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

pub fn from_rfc3339(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}
