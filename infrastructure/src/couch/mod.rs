//! Document database adapter
//!
//! Implements [`AnswerRepository`](qa_application::AnswerRepository) over a
//! CouchDB-compatible HTTP API (CouchDB, Cloudant) using `reqwest`.

pub mod error;
pub mod protocol;
pub mod repository;
