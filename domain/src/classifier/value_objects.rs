//! Classifier value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a classifier hosted by the remote service (Value Object)
///
/// Always non-empty. An empty id from configuration means "not configured"
/// and is represented by `Option::None` instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClassifierId(String);

impl ClassifierId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            Err(DomainError::InvalidClassifierId)
        } else {
            Ok(Self(id))
        }
    }

    /// Convert an optional configuration value, treating blank as absent.
    pub fn from_optional(id: Option<&str>) -> Option<Self> {
        id.and_then(|s| Self::new(s).ok())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClassifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ClassifierId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClassifierId> for String {
    fn from(id: ClassifierId) -> Self {
        id.0
    }
}

/// Number of ranked classes requested from a classification (Value Object)
///
/// Bounded to `[TopN::MIN, TopN::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TopN(usize);

impl TopN {
    pub const MIN: usize = 1;
    pub const MAX: usize = 10;

    pub fn new(value: usize) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidTopN {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<usize> for TopN {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopN> for usize {
    fn from(n: TopN) -> Self {
        n.0
    }
}

/// A single ranked class returned by a classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub class_name: String,
    pub confidence: f64,
}

impl ClassScore {
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
        }
    }
}

/// Result of classifying a piece of text
///
/// `classes` is ordered by confidence, highest first, as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub classifier_id: String,
    pub text: String,
    pub top_class: String,
    pub classes: Vec<ClassScore>,
}

impl Classification {
    /// The first `n` ranked classes.
    pub fn ranked(&self, n: TopN) -> &[ClassScore] {
        let end = n.get().min(self.classes.len());
        &self.classes[..end]
    }
}
