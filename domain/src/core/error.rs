//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("top_n must be between {min} and {max}, got {value}")]
    InvalidTopN { value: usize, min: usize, max: usize },

    #[error("Classifier id cannot be empty")]
    InvalidClassifierId,
}
