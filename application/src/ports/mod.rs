//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod answer_log;
pub mod answer_repository;
pub mod classifier_gateway;
