//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// The `Display` text of the caller-facing variants is exactly what the HTTP
/// front-end writes as a plain-text body and the RPC front-end puts in the
/// error message.
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport-independent classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty required field
    InvalidArgument,
    NotFound,
    AlreadyExists,
    /// Malformed request body
    InvalidRequest,
    /// Unexpected storage or runtime failure
    Internal,
}

impl Error {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an already exists error
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// The "account not found" error every store returns
    pub fn account_not_found() -> Self {
        Self::not_found("account not found")
    }

    /// The "account already exists" error every store returns
    pub fn account_exists() -> Self {
        Self::already_exists("account already exists")
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::InvalidArgument,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Error::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Error::Database(_) | Error::Io(_) | Error::Json(_) => ErrorKind::Internal,
        }
    }
}

impl From<duckdb::Error> for Error {
    fn from(e: duckdb::Error) -> Self {
        Self::Database(e.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
