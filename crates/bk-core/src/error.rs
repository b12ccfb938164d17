use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("task not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("weekly goal must be positive, got {minutes}")]
    NonPositiveGoal { minutes: i64 },
    #[error("invalid config: {message}")]
    InvalidInput { message: String },
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("no signed-in user")]
    SignedOut,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {reason}")]
    Unavailable { reason: String },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Log(#[from] LogError),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
