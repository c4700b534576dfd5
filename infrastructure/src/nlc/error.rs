//! Error types for the classifier service adapter

use qa_application::GatewayError;
use thiserror::Error;

/// Result type alias for classifier service operations
pub type Result<T> = std::result::Result<T, NlcError>;

/// Errors that can occur when talking to the classifier service
#[derive(Error, Debug)]
pub enum NlcError {
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (code {status}): {error}")]
    Api {
        status: u16,
        error: String,
        description: Option<String>,
    },
}

impl From<NlcError> for GatewayError {
    fn from(error: NlcError) -> Self {
        match error {
            NlcError::Api {
                status,
                error,
                description,
            } => GatewayError::Http {
                status,
                error,
                description,
            },
            NlcError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            NlcError::Http(e) if e.is_decode() => GatewayError::InvalidResponse(e.to_string()),
            NlcError::Http(e) => GatewayError::ConnectionError(e.to_string()),
            NlcError::InvalidUrl(url) => GatewayError::ConnectionError(format!("invalid URL: {}", url)),
        }
    }
}
