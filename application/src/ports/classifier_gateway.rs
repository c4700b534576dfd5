//! Classifier Gateway port
//!
//! Defines the interface for communicating with the text-classification service.

use async_trait::async_trait;
use qa_domain::{AnswerError, Classification, Classifier, ClassifierId, ClassifierSummary};
use thiserror::Error;

/// Errors that can occur during classifier gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The service answered with a non-success status
    #[error("HTTP {status}: {error}")]
    Http {
        status: u16,
        error: String,
        description: Option<String>,
    },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Cancelled")]
    Cancelled,
}

impl From<GatewayError> for AnswerError {
    fn from(error: GatewayError) -> Self {
        match error {
            GatewayError::Http { status, error, .. } => AnswerError::upstream(error, Some(status)),
            GatewayError::Cancelled => AnswerError::Cancelled,
            other => AnswerError::upstream(other.to_string(), None),
        }
    }
}

/// Parameters for training a new classifier
#[derive(Debug, Clone)]
pub struct CreateClassifierRequest {
    pub name: String,
    pub language: String,
    /// Training data in CSV form (`text,class` per line)
    pub training_data: Vec<u8>,
}

impl CreateClassifierRequest {
    pub fn new(training_data: Vec<u8>) -> Self {
        Self {
            name: "classifier".to_string(),
            language: "ja".to_string(),
            training_data,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Gateway for the classification service
///
/// This port defines how the application layer talks to the classifier
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ClassifierGateway: Send + Sync {
    /// List all classifiers (no status information)
    async fn list_classifiers(&self) -> Result<Vec<ClassifierSummary>, GatewayError>;

    /// Get the full record, including status, of one classifier
    async fn get_classifier(&self, classifier_id: &str) -> Result<Classifier, GatewayError>;

    /// Classify text with the given classifier
    async fn classify(
        &self,
        classifier_id: &ClassifierId,
        text: &str,
    ) -> Result<Classification, GatewayError>;

    /// Start training a new classifier
    async fn create_classifier(
        &self,
        request: CreateClassifierRequest,
    ) -> Result<Classifier, GatewayError>;
}
