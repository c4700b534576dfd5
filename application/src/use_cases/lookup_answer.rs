//! Lookup Answer use case
//!
//! Fetches stored answers by class name and the application settings.

use crate::ports::answer_repository::{AnswerRepository, StoreError};
use crate::use_cases::shared::run_cancellable;
use qa_domain::{Answer, AnswerError, AppSettings};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Use case for reading from the answer store
pub struct AnswerLookup<R: AnswerRepository + 'static> {
    repository: Arc<R>,
    cancellation_token: Option<CancellationToken>,
}

impl<R: AnswerRepository + 'static> AnswerLookup<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Look up the answer stored under `class_name` and attach `confidence`.
    pub async fn get(&self, class_name: &str, confidence: f64) -> Result<Answer, AnswerError> {
        debug!("Looking up answer for class {}", class_name);

        let doc = run_cancellable(
            &self.cancellation_token,
            || StoreError::Cancelled,
            self.repository.get_answer(class_name),
        )
        .await
        .inspect_err(|e| {
            if e.is_not_found() {
                debug!("No answer stored for class {}", class_name);
            } else {
                warn!("Answer lookup for {} failed: {}", class_name, e);
            }
        })?;

        Ok(Answer::from_document(doc, confidence))
    }

    /// Application settings, falling back to the defaults on any error.
    pub async fn app_settings(&self) -> AppSettings {
        match run_cancellable(
            &self.cancellation_token,
            || StoreError::Cancelled,
            self.repository.get_app_settings(),
        )
        .await
        {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Using default app settings: {}", e);
                AppSettings::default()
            }
        }
    }
}
