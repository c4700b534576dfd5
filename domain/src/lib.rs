//! Domain layer for nlc-qa
//!
//! This crate contains the core entities, value objects and rules.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Classifier
//!
//! A trained text-categorization model hosted by a remote service. The
//! newest classifier with status `Available` answers questions.
//!
//! ## Answer
//!
//! A stored document keyed by class name. Classifying a question yields a
//! class name; the class name yields the answer.

pub mod answer;
pub mod classifier;
pub mod config;
pub mod core;

// Re-export commonly used types
pub use answer::{
    entities::{
        APP_SETTINGS_ID, AnswerDocument, AppSettings, DEFAULT_APP_NAME, DEFAULT_LIST_MAP,
        DesignDocument, View,
    },
    error::AnswerError,
    value_objects::Answer,
};
pub use classifier::{
    entities::{Classifier, ClassifierStatus, ClassifierSummary},
    selection::select_latest_available,
    value_objects::{ClassScore, Classification, ClassifierId, TopN},
};
pub use config::OutputFormat;
pub use core::error::DomainError;
