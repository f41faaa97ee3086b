//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section is optional; missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("storage.{0} cannot be empty")]
    EmptyFileName(&'static str),

    #[error("storage.taxonomy_file and storage.documents_file must differ")]
    SharedStorageFile,

    #[error("logging.file must name a file, got {0}")]
    InvalidLogFile(String),
}

/// Output format selectable from config or the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileOutputFormat {
    /// Human-readable tables (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Raw storage configuration from TOML (`[storage]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory holding the data files
    pub data_dir: PathBuf,
    /// Taxonomy file name, relative to `data_dir`
    pub taxonomy_file: String,
    /// Document records file name, relative to `data_dir`
    pub documents_file: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            taxonomy_file: "classes.json".to_string(),
            documents_file: "files.json".to_string(),
        }
    }
}

impl FileStorageConfig {
    pub fn taxonomy_path(&self) -> PathBuf {
        self.data_dir.join(&self.taxonomy_file)
    }

    pub fn documents_path(&self) -> PathBuf {
        self.data_dir.join(&self.documents_file)
    }
}

/// Raw output configuration from TOML (`[output]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Output format
    pub format: Option<FileOutputFormat>,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

/// Raw logging configuration from TOML (`[logging]` section)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Also write logs to this file
    pub file: Option<PathBuf>,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Storage settings
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.storage.taxonomy_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("taxonomy_file"));
        }
        if self.storage.documents_file.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFileName("documents_file"));
        }
        if self.storage.taxonomy_file == self.storage.documents_file {
            return Err(ConfigValidationError::SharedStorageFile);
        }

        if let Some(file) = &self.logging.file
            && file.file_name().is_none()
        {
            return Err(ConfigValidationError::InvalidLogFile(
                file.display().to_string(),
            ));
        }

        Ok(())
    }
}
