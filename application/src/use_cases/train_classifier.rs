//! Train Classifier use case
//!
//! Starts training a classifier from CSV data, unless one already exists
//! and creation is not forced.

use crate::ports::classifier_gateway::{ClassifierGateway, CreateClassifierRequest, GatewayError};
use qa_domain::{Classifier, ClassifierSummary};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Result of a training request
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TrainOutcome {
    /// A new classifier was created and is training
    Created { classifier: Classifier },
    /// Classifiers already exist; nothing was created
    Skipped { existing: Vec<ClassifierSummary> },
}

/// Use case for training a new classifier
pub struct TrainClassifierUseCase<G: ClassifierGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: ClassifierGateway + 'static> TrainClassifierUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Create a classifier when `force` is set or none exist yet.
    pub async fn execute(
        &self,
        request: CreateClassifierRequest,
        force: bool,
    ) -> Result<TrainOutcome, GatewayError> {
        let existing = self.gateway.list_classifiers().await?;

        if !force && !existing.is_empty() {
            info!(
                "{} classifier(s) already exist, not creating a new one",
                existing.len()
            );
            return Ok(TrainOutcome::Skipped { existing });
        }

        let classifier = self.gateway.create_classifier(request).await?;
        info!(
            "Classifier {} created (status: {})",
            classifier.classifier_id, classifier.status
        );
        Ok(TrainOutcome::Created { classifier })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockGateway;
    use qa_domain::ClassifierStatus;

    fn request() -> CreateClassifierRequest {
        CreateClassifierRequest::new(b"hello,general_hello\n".to_vec())
    }

    #[tokio::test]
    async fn test_creates_when_none_exist() {
        let gateway = Arc::new(MockGateway::new());
        let use_case = TrainClassifierUseCase::new(Arc::clone(&gateway));

        let outcome = use_case.execute(request(), false).await.unwrap();

        match outcome {
            TrainOutcome::Created { classifier } => {
                assert_eq!(classifier.status, ClassifierStatus::Training);
                assert_eq!(classifier.language.as_deref(), Some("ja"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(gateway.count("create:classifier:ja"), 1);
    }

    #[tokio::test]
    async fn test_skips_when_classifier_exists() {
        let gateway =
            Arc::new(MockGateway::new().with_classifier("A", 100, ClassifierStatus::Available));
        let use_case = TrainClassifierUseCase::new(Arc::clone(&gateway));

        let outcome = use_case.execute(request(), false).await.unwrap();

        assert!(matches!(outcome, TrainOutcome::Skipped { ref existing } if existing.len() == 1));
        assert_eq!(gateway.count("create:"), 0);
    }

    #[tokio::test]
    async fn test_force_creates_anyway() {
        let gateway =
            Arc::new(MockGateway::new().with_classifier("A", 100, ClassifierStatus::Available));
        let use_case = TrainClassifierUseCase::new(Arc::clone(&gateway));

        let outcome = use_case
            .execute(request().with_language("en"), true)
            .await
            .unwrap();

        assert!(matches!(outcome, TrainOutcome::Created { .. }));
        assert_eq!(gateway.count("create:classifier:en"), 1);
    }

    #[tokio::test]
    async fn test_listing_error_propagates() {
        let gateway = Arc::new(MockGateway::new().with_listing_error(GatewayError::Timeout));
        let use_case = TrainClassifierUseCase::new(gateway);

        let result = use_case.execute(request(), true).await;

        assert_eq!(result.unwrap_err(), GatewayError::Timeout);
    }
}
