//! Answer log port
//!
//! A transcript of answered questions, kept apart from `tracing` output.

use chrono::{DateTime, Utc};
use qa_domain::{Answer, ClassifierId};
use serde::{Deserialize, Serialize};

/// Which question-answering operation produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AskKind {
    Ask,
    AskTop,
    AskClassName,
}

/// One answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub asked_at: DateTime<Utc>,
    pub kind: AskKind,
    /// Question text, or the class name for [`AskKind::AskClassName`]
    pub question: String,
    /// Classifier that ranked the answers; `None` for direct lookups and
    /// when no classifier could be resolved
    pub classifier_id: Option<ClassifierId>,
    pub answers: Vec<Answer>,
}

impl AnswerRecord {
    pub fn new(
        kind: AskKind,
        question: impl Into<String>,
        classifier_id: Option<ClassifierId>,
        answers: Vec<Answer>,
    ) -> Self {
        Self {
            asked_at: Utc::now(),
            kind,
            question: question.into(),
            classifier_id,
            answers,
        }
    }
}

/// Sink for [`AnswerRecord`]s.
///
/// Recording never fails the question; adapters report their own errors.
pub trait AnswerLog: Send + Sync {
    fn record(&self, record: &AnswerRecord);
}
