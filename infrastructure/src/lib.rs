//! Infrastructure layer for nlc-qa
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod couch;
pub mod http;
pub mod logging;
pub mod nlc;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAskConfig, FileClassifierConfig, FileConfig,
    FileOutputConfig, FileStoreConfig,
};
pub use couch::{error::CouchError, repository::CouchAnswerRepository};
pub use http::BasicAuth;
pub use logging::JsonlAnswerLog;
pub use nlc::{error::NlcError, gateway::NlcClassifierGateway};

#[cfg(test)]
mod test_server;
