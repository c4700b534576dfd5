//! Application-level configuration.
//!
//! - [`QaParams`] — classifier pinning and ranking depth for question answering

pub mod qa_params;

pub use qa_params::QaParams;
