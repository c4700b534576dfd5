//! Answer value object

use super::entities::AnswerDocument;
use super::error::AnswerError;
use serde::{Deserialize, Serialize};

/// The answer to a question (Value Object)
///
/// Built per request and never persisted. Errors use the same shape with an
/// empty `class_name` and zero confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub class_name: String,
    pub message: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<serde_json::Value>,
}

impl Answer {
    /// Join a stored document with the confidence of the class that selected it.
    pub fn from_document(doc: AnswerDocument, confidence: f64) -> Self {
        Self {
            class_name: doc.id,
            message: doc.message,
            confidence,
            option: doc.option,
        }
    }

    pub fn from_error(error: &AnswerError) -> Self {
        Self {
            class_name: String::new(),
            message: error.to_string(),
            confidence: 0.0,
            option: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.class_name.is_empty()
    }
}

impl From<AnswerError> for Answer {
    fn from(error: AnswerError) -> Self {
        Answer::from_error(&error)
    }
}

impl From<Result<Answer, AnswerError>> for Answer {
    fn from(result: Result<Answer, AnswerError>) -> Self {
        result.unwrap_or_else(Answer::from)
    }
}
