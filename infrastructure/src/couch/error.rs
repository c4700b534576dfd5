//! Error types for the document database adapter

use qa_application::StoreError;
use thiserror::Error;

/// Result type alias for document database operations
pub type Result<T> = std::result::Result<T, CouchError>;

/// Errors that can occur when talking to the document database
#[derive(Error, Debug)]
pub enum CouchError {
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error (code {status}): {error}")]
    Api {
        status: u16,
        error: String,
        reason: Option<String>,
    },
}

impl From<CouchError> for StoreError {
    fn from(error: CouchError) -> Self {
        match error {
            CouchError::Api { status: 404, reason, error } => {
                StoreError::NotFound(reason.unwrap_or(error))
            }
            CouchError::Api { status: 409, reason, error } => {
                StoreError::Conflict(reason.unwrap_or(error))
            }
            CouchError::Api {
                status,
                error,
                reason,
            } => StoreError::Http {
                status,
                error,
                reason,
            },
            CouchError::Http(e) if e.is_timeout() => StoreError::Timeout,
            CouchError::Http(e) if e.is_decode() => StoreError::InvalidResponse(e.to_string()),
            CouchError::Http(e) => StoreError::ConnectionError(e.to_string()),
            CouchError::InvalidUrl(url) => StoreError::ConnectionError(format!("invalid URL: {}", url)),
        }
    }
}
