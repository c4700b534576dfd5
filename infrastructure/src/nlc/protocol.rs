//! Wire types of the classifier REST API (`/v1/classifiers`).
//!
//! | Call | Method | Path | Body |
//! |------|--------|------|------|
//! | list | GET | `/v1/classifiers` | — |
//! | status | GET | `/v1/classifiers/{id}` | — |
//! | classify | POST | `/v1/classifiers/{id}/classify` | `{"text": ...}` |
//! | create | POST | `/v1/classifiers` | multipart `training_metadata` + `training_data` |
//!
//! Status and classify responses decode straight into the domain types
//! [`Classifier`](qa_domain::Classifier) and
//! [`Classification`](qa_domain::Classification).

use qa_domain::ClassifierSummary;
use serde::{Deserialize, Serialize};

pub const API_VERSION: &str = "v1";
pub const CLASSIFIERS: &str = "classifiers";
pub const CLASSIFY: &str = "classify";

/// Response of the list call
#[derive(Debug, Deserialize)]
pub struct ListClassifiersResponse {
    #[serde(default)]
    pub classifiers: Vec<ClassifierSummary>,
}

/// Body of the classify call
#[derive(Debug, Serialize)]
pub struct ClassifyRequest<'a> {
    pub text: &'a str,
}

/// `training_metadata` part of the create call
#[derive(Debug, Serialize)]
pub struct TrainingMetadata<'a> {
    pub language: &'a str,
    pub name: &'a str,
}

/// Error body returned with non-success statuses
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, tolerating non-JSON payloads.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}
