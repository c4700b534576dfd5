//! Classify Text use case
//!
//! Sends question text to the classification service and returns the
//! ranked classes.

use crate::ports::classifier_gateway::{ClassifierGateway, GatewayError};
use crate::use_cases::shared::run_cancellable;
use qa_domain::{AnswerError, ClassScore, ClassifierId, TopN};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Use case for classifying a piece of text
pub struct ClassifyTextUseCase<G: ClassifierGateway + 'static> {
    gateway: Arc<G>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: ClassifierGateway + 'static> ClassifyTextUseCase<G> {
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

    /// Classify `text`, returning at most `top_n` ranked classes.
    ///
    /// `top_n` outside `[1, 10]` and a missing classifier are both
    /// rejected before any request is sent.
    pub async fn execute(
        &self,
        classifier_id: Option<&ClassifierId>,
        text: &str,
        top_n: usize,
    ) -> Result<Vec<ClassScore>, AnswerError> {
        let top_n = TopN::new(top_n).map_err(|e| AnswerError::InvalidRequest(e.to_string()))?;

        let Some(classifier_id) = classifier_id else {
            return Err(AnswerError::NotConfigured);
        };

        debug!("Classifying with {} (top {})", classifier_id, top_n.get());

        let classification = run_cancellable(
            &self.cancellation_token,
            || GatewayError::Cancelled,
            self.gateway.classify(classifier_id, text),
        )
        .await?;

        Ok(classification.ranked(top_n).to_vec())
    }
}
