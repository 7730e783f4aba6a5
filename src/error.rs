use thiserror::Error;

/// Coarse failure classes surfaced to transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    Forbidden,
    Unauthorized,
    NotFound,
    RequestTimeout,
    InternalServerError,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("no auth credentials provided")]
    Unauthenticated,

    #[error("token is not valid")]
    InvalidSession,

    #[error("session is no longer valid")]
    SessionInvalidated,

    #[error("session is expired")]
    SessionExpired,

    #[error("permission denied")]
    PermissionDenied,

    #[error("request timed out")]
    Timeout,
}

impl Error {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BadRequest(_) => ErrorKind::BadRequest,
            Error::Forbidden(_) => ErrorKind::Forbidden,
            Error::Unauthorized(_)
            | Error::Unauthenticated
            | Error::InvalidSession
            | Error::SessionInvalidated
            | Error::SessionExpired
            | Error::PermissionDenied => ErrorKind::Unauthorized,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Timeout => ErrorKind::RequestTimeout,
            Error::Database(_) | Error::Io(_) | Error::Config(_) => ErrorKind::InternalServerError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
