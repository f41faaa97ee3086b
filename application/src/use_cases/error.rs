//! Errors returned by the catalog use cases.

use crate::ports::store_error::StoreError;
use exam_catalog_domain::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// An administrative operation was attempted by a visitor.
    #[error("Administrator access required to {0}")]
    AdminRequired(&'static str),
}

impl CatalogError {
    /// Check if the caller should answer with "not found" (404 / redirect).
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Domain(e) if e.is_not_found())
    }
}
