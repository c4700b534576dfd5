//! Application layer for nlc-qa
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::QaParams;
pub use ports::{
    answer_log::{AnswerLog, AnswerRecord, AskKind},
    answer_repository::{AnswerRepository, BulkResult, DatabaseStatus, StoreError},
    classifier_gateway::{ClassifierGateway, CreateClassifierRequest, GatewayError},
};
pub use use_cases::classifier_cache::ClassifierIdCache;
pub use use_cases::classify_text::ClassifyTextUseCase;
pub use use_cases::lookup_answer::AnswerLookup;
pub use use_cases::qa_model::QaModel;
pub use use_cases::resolve_classifier::ClassifierResolver;
pub use use_cases::setup_store::{
    DesignStatus, SetupError, SetupInput, SetupOutput, SetupStoreUseCase,
};
pub use use_cases::train_classifier::{TrainClassifierUseCase, TrainOutcome};
