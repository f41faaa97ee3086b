//! Errors reported by persistence adapters.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing persisted catalog state
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored data exists but cannot be decoded at all.
    #[error("Unreadable data in {}: {message}", path.display())]
    Corrupt { path: PathBuf, message: String },

    #[error("Document identifiers exhausted")]
    IdsExhausted,

    #[error("Could not encode {what}: {message}")]
    Encode { what: &'static str, message: String },
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, StoreError::Corrupt { .. })
    }
}
