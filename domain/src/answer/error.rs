//! Errors that surface to callers as answers

use thiserror::Error;

/// Every way producing an answer can fail
///
/// All variants collapse into the same answer shape (see
/// [`Answer::from_error`](super::value_objects::Answer::from_error)),
/// so callers never need a separate error path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Classifier is not configured.")]
    NotConfigured,

    #[error("An error occurred. {error} (code={})", display_code(.code))]
    Upstream { error: String, code: Option<u16> },

    #[error("An error occurred. {error} (code={code})")]
    NotFound { error: String, code: u16 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request cancelled.")]
    Cancelled,
}

impl AnswerError {
    /// The not-found error as reported by the document database.
    pub fn not_found() -> Self {
        AnswerError::NotFound {
            error: "not_found".to_string(),
            code: 404,
        }
    }

    pub fn upstream(error: impl Into<String>, code: Option<u16>) -> Self {
        AnswerError::Upstream {
            error: error.into(),
            code,
        }
    }

    /// Status code carried by the error, if any.
    pub fn code(&self) -> Option<u16> {
        match self {
            AnswerError::Upstream { code, .. } => *code,
            AnswerError::NotFound { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn display_code(code: &Option<u16>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}
