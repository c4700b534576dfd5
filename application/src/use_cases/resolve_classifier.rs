//! Resolve Classifier use case
//!
//! Finds the classifier that should answer questions: the most recently
//! created one whose status is `Available`.

use crate::ports::classifier_gateway::{ClassifierGateway, GatewayError};
use crate::use_cases::shared::run_cancellable;
use futures::future::join_all;
use qa_domain::{ClassifierId, select_latest_available};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Use case for resolving the classifier id from the remote service
pub struct ClassifierResolver<G: ClassifierGateway + 'static> {
    gateway: Arc<G>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: ClassifierGateway + 'static> ClassifierResolver<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            cancellation_token: None,
        }
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Resolve the newest available classifier.
    ///
    /// Returns `Ok(None)` when the listing fails, is empty, or holds no
    /// available classifier. Listing errors are logged, never raised.
    /// Status lookups run concurrently; a failed lookup drops that entry.
    ///
    /// Cancellation is the only error.
    pub async fn resolve(&self) -> Result<Option<ClassifierId>, GatewayError> {
        let token = &self.cancellation_token;

        let summaries = match run_cancellable(
            token,
            || GatewayError::Cancelled,
            self.gateway.list_classifiers(),
        )
        .await
        {
            Ok(summaries) => summaries,
            Err(GatewayError::Cancelled) => return Err(GatewayError::Cancelled),
            Err(e) => {
                warn!("Failed to list classifiers: {}", e);
                return Ok(None);
            }
        };

        if summaries.is_empty() {
            info!("No classifiers found");
            return Ok(None);
        }

        debug!("Fetching status of {} classifiers", summaries.len());

        let lookups = summaries.iter().map(|s| {
            run_cancellable(
                token,
                || GatewayError::Cancelled,
                self.gateway.get_classifier(&s.classifier_id),
            )
        });
        let results = join_all(lookups).await;

        let mut classifiers = Vec::with_capacity(results.len());
        for (result, summary) in results.into_iter().zip(summaries.iter()) {
            match result {
                Ok(classifier) => classifiers.push(classifier),
                Err(GatewayError::Cancelled) => return Err(GatewayError::Cancelled),
                Err(e) => debug!("Skipping classifier {}: {}", summary.classifier_id, e),
            }
        }

        let selected = select_latest_available(classifiers);
        match &selected {
            Some(id) => info!("Resolved classifier {}", id),
            None => info!("No available classifier among {}", summaries.len()),
        }
        Ok(selected)
    }
}
