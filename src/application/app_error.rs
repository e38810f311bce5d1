use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database not connected yet. Please try again shortly.")]
    StoreNotReady,

    #[error("{0}")]
    StoreUnavailable(String),

    #[error("Too many requests, please try again later.")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    DuplicateEmail,
    StoreNotReady,
    StoreUnavailable,
    RateLimited,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::DuplicateEmail => "DUPLICATE_EMAIL",
            ErrorCode::StoreNotReady => "STORE_NOT_READY",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::DuplicateEmail => ErrorCode::DuplicateEmail,
            AppError::StoreNotReady => ErrorCode::StoreNotReady,
            AppError::StoreUnavailable(_) => ErrorCode::StoreUnavailable,
            AppError::RateLimited => ErrorCode::RateLimited,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
