//! Use cases (application services)

pub mod browse_catalog;
pub mod error;
pub mod manage_documents;
pub mod taxonomy;
