//! JSON file adapters for the persistence ports.

mod json_document_repository;
mod json_taxonomy_store;
pub mod records;

pub use json_document_repository::JsonDocumentRepository;
pub use json_taxonomy_store::JsonTaxonomyStore;

use exam_catalog_application::StoreError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Read a data file. A missing or blank file reads as `None`.
pub(crate) async fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path).await {
        Ok(content) if content.trim().is_empty() => Ok(None),
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Replace a data file by writing a sibling temp file and renaming it over.
///
/// Readers see either the old or the new content, never a partial write.
pub(crate) async fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, content)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
