//! Classifier service adapter
//!
//! Implements [`ClassifierGateway`](qa_application::ClassifierGateway) over
//! the hosted classifier REST API using `reqwest`.

pub mod error;
pub mod gateway;
pub mod protocol;
