//! Infrastructure layer for exam-catalog
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileStorageConfig,
};
pub use storage::{JsonDocumentRepository, JsonTaxonomyStore};
