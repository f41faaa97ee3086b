//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod document_repository;
pub mod memory;
pub mod store_error;
pub mod taxonomy_store;
