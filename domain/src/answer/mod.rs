//! Answer subdomain
//!
//! Answers are pre-stored documents keyed by class name. A classification
//! picks the class, the class name picks the document.

pub mod entities;
pub mod error;
pub mod value_objects;
