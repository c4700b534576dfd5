//! Classifier entities as reported by the classification service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Training status of a classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierStatus {
    #[serde(rename = "Non Existent")]
    NonExistent,
    Training,
    Failed,
    Available,
    Unavailable,
    /// Any status string this client does not know about
    #[serde(other)]
    Unknown,
}

impl ClassifierStatus {
    /// Only available classifiers accept classify requests.
    pub fn is_available(&self) -> bool {
        matches!(self, ClassifierStatus::Available)
    }
}

impl std::fmt::Display for ClassifierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ClassifierStatus::NonExistent => "Non Existent",
            ClassifierStatus::Training => "Training",
            ClassifierStatus::Failed => "Failed",
            ClassifierStatus::Available => "Available",
            ClassifierStatus::Unavailable => "Unavailable",
            ClassifierStatus::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// Listing entry for a classifier (the listing carries no status)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSummary {
    pub classifier_id: String,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Full classifier record including its status (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifier {
    pub classifier_id: String,
    pub created: DateTime<Utc>,
    pub status: ClassifierStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_description: Option<String>,
}

impl Classifier {
    pub fn new(
        classifier_id: impl Into<String>,
        created: DateTime<Utc>,
        status: ClassifierStatus,
    ) -> Self {
        Self {
            classifier_id: classifier_id.into(),
            created,
            status,
            name: None,
            language: None,
            url: None,
            status_description: None,
        }
    }
}
