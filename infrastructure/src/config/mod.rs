//! Configuration loading
//!
//! TOML files and environment variables merged with `figment`.

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileAskConfig, FileClassifierConfig, FileConfig, FileOutputConfig,
    FileStoreConfig,
};
pub use loader::ConfigLoader;
