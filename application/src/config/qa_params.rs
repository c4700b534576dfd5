//! Q&A parameters — use case control.
//!
//! [`QaParams`] groups the static parameters that control
//! [`QaModel`](crate::use_cases::qa_model::QaModel). These are
//! application-layer concerns, not domain policy.

use qa_domain::{ClassifierId, TopN};

/// Parameters for answering questions.
#[derive(Debug, Clone, Default)]
pub struct QaParams {
    /// Classifier pinned by configuration; resolved lazily when `None`.
    pub classifier_id: Option<ClassifierId>,
    /// Number of ranked classes joined by `ask_top` when no count is given.
    pub top_n: TopN,
}

impl QaParams {
    // ==================== Builder Methods ====================

    pub fn with_classifier_id(mut self, id: Option<ClassifierId>) -> Self {
        self.classifier_id = id;
        self
    }

    pub fn with_top_n(mut self, top_n: TopN) -> Self {
        self.top_n = top_n;
        self
    }
}
