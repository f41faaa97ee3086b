//! Core domain concepts shared across all subdomains.
//!
//! - [`identifier::ClassId`] / [`identifier::SubjectId`]: normalized identifiers
//! - [`slug`]: exam label normalization
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod identifier;
pub mod slug;
