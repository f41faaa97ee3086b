//! Configuration file loading for exam-catalog
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `EXAM_CATALOG_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./exam-catalog.toml` or `./.exam-catalog.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/exam-catalog/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileStorageConfig,
};
pub use loader::ConfigLoader;
