use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    /// Unique constraint rejected the write.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store could not be reached at all.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A third-party HTTP API answered with a failure or could not be reached.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug)]
pub enum ErrorCode {
    DatabaseError,
    AlreadyOnWaitlist,
    StoreUnavailable,
    InvalidInput,
    UpstreamError,
    ConfigError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::AlreadyOnWaitlist => "ALREADY_ON_WAITLIST",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
