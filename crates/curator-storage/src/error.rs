//! Error types for the curator-storage crate

use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while talking to the storage backend
#[derive(Error, Debug)]
pub enum StorageError {
    /// Upload session not found
    #[error("upload session not found: {0}")]
    SessionNotFound(String),

    /// Object not found
    #[error("object not found: {0}")]
    ObjectNotFound(String),

    /// Backend rejected the call
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// Response body did not match the expected shape
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Link does not address anything this backend serves
    #[error("invalid link: {0}")]
    InvalidLink(String),

    /// Connection error
    #[error("connection error: {0}")]
    Connection(String),

    /// Timeout error
    #[error("operation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// HTTP error
    #[error("http error: {0}")]
    Http(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StorageError::Timeout { seconds: 30 }
        } else if err.is_connect() {
            StorageError::Connection(err.to_string())
        } else {
            StorageError::Http(err.to_string())
        }
    }
}
