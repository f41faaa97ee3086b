//! Application layer for exam-catalog
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    document_repository::DocumentRepository,
    memory::{InMemoryDocumentRepository, InMemoryTaxonomyStore},
    store_error::StoreError,
    taxonomy_store::TaxonomyStore,
};
pub use use_cases::browse_catalog::{
    BrowseCatalogUseCase, BrowseInput, BrowseOutput, SubjectMenu,
};
pub use use_cases::error::CatalogError;
pub use use_cases::manage_documents::{ManageDocumentsUseCase, RegisterDocumentInput};
pub use use_cases::taxonomy::TaxonomyUseCase;
