//! Answer Repository port
//!
//! Defines the interface to the document database holding answers.

use async_trait::async_trait;
use qa_domain::{AnswerDocument, AnswerError, AppSettings, DesignDocument};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during answer store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Document update conflict: {0}")]
    Conflict(String),

    /// The database answered with a non-success status
    #[error("HTTP {status}: {error}")]
    Http {
        status: u16,
        error: String,
        reason: Option<String>,
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

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<StoreError> for AnswerError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(_) => AnswerError::not_found(),
            StoreError::Conflict(_) => AnswerError::upstream("conflict", Some(409)),
            StoreError::Http { status, error, .. } => AnswerError::upstream(error, Some(status)),
            StoreError::Cancelled => AnswerError::Cancelled,
            other => AnswerError::upstream(other.to_string(), None),
        }
    }
}

/// Outcome of ensuring the answer database exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    Created,
    AlreadyExists,
}

/// Per-document result of a bulk insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl BulkResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Repository of answer documents
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Fetch the answer document stored under `class_name`
    async fn get_answer(&self, class_name: &str) -> Result<AnswerDocument, StoreError>;

    /// Fetch the application settings document
    async fn get_app_settings(&self) -> Result<AppSettings, StoreError>;

    /// Create the database unless it already exists
    async fn ensure_database(&self) -> Result<DatabaseStatus, StoreError>;

    /// Store a design document
    async fn put_design_document(&self, design: &DesignDocument) -> Result<(), StoreError>;

    /// Insert many raw documents at once
    async fn bulk_insert(&self, docs: Vec<serde_json::Value>)
    -> Result<Vec<BulkResult>, StoreError>;

    /// List all answer documents through the answers view
    async fn list_answers(&self) -> Result<Vec<AnswerDocument>, StoreError>;
}
