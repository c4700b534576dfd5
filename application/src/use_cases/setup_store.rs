//! Setup Store use case
//!
//! Prepares the answer database: creates it when missing, registers the
//! answers design document and loads answer documents.

use crate::ports::answer_repository::{AnswerRepository, BulkResult, DatabaseStatus, StoreError};
use qa_domain::{AnswerDocument, DesignDocument};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur during store setup
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Input for the SetupStore use case
#[derive(Debug, Clone, Default)]
pub struct SetupInput {
    /// Replacement source for the `list` view's map function
    pub map_override: Option<String>,
    /// Raw documents to bulk insert (answers and optionally `app_settings`)
    pub documents: Vec<serde_json::Value>,
}

impl SetupInput {
    pub fn with_map_override(mut self, map: impl Into<String>) -> Self {
        self.map_override = Some(map.into());
        self
    }

    pub fn with_documents(mut self, documents: Vec<serde_json::Value>) -> Self {
        self.documents = documents;
        self
    }
}

/// Whether the design document was written by this run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DesignStatus {
    Registered,
    AlreadyRegistered,
}

/// Output of the SetupStore use case
#[derive(Debug, Clone, Serialize)]
pub struct SetupOutput {
    pub database: DatabaseStatus,
    pub design: DesignStatus,
    pub inserted: Vec<BulkResult>,
}

impl SetupOutput {
    pub fn failed_documents(&self) -> impl Iterator<Item = &BulkResult> {
        self.inserted.iter().filter(|r| !r.is_ok())
    }
}

/// Use case for preparing the answer database
pub struct SetupStoreUseCase<R: AnswerRepository + 'static> {
    repository: Arc<R>,
}

impl<R: AnswerRepository + 'static> SetupStoreUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create the database, register the design document, load documents.
    pub async fn execute(&self, input: SetupInput) -> Result<SetupOutput, SetupError> {
        let database = self.ensure_database().await?;
        let design = self
            .register_design_document(input.map_override.as_deref())
            .await?;
        let inserted = self.load_documents(input.documents).await?;

        Ok(SetupOutput {
            database,
            design,
            inserted,
        })
    }

    pub async fn ensure_database(&self) -> Result<DatabaseStatus, SetupError> {
        let status = self.repository.ensure_database().await?;
        match status {
            DatabaseStatus::Created => info!("Answer database created"),
            DatabaseStatus::AlreadyExists => info!("Answer database already exists"),
        }
        Ok(status)
    }

    /// Store the answers design document. An existing one is left as is.
    pub async fn register_design_document(
        &self,
        map_override: Option<&str>,
    ) -> Result<DesignStatus, SetupError> {
        let design = DesignDocument::answers(map_override);
        match self.repository.put_design_document(&design).await {
            Ok(()) => {
                info!("Design document {} registered", design.id);
                Ok(DesignStatus::Registered)
            }
            Err(StoreError::Conflict(_)) => {
                warn!("Design document {} already registered", design.id);
                Ok(DesignStatus::AlreadyRegistered)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn load_documents(
        &self,
        documents: Vec<serde_json::Value>,
    ) -> Result<Vec<BulkResult>, SetupError> {
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let count = documents.len();
        let results = self.repository.bulk_insert(documents).await?;
        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!("Loaded {} documents ({} failed)", count - failed, failed);
        Ok(results)
    }

    /// All answer documents, through the answers view.
    pub async fn list_answers(&self) -> Result<Vec<AnswerDocument>, SetupError> {
        Ok(self.repository.list_answers().await?)
    }
}
