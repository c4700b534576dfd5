//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod classifier_cache;
pub mod classify_text;
pub mod lookup_answer;
pub mod qa_model;
pub mod resolve_classifier;
pub mod setup_store;
pub(crate) mod shared;
pub mod train_classifier;

#[cfg(test)]
pub(crate) mod test_support;
