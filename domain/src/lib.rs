//! Domain layer for exam-catalog
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns, and
//! performs no I/O.
//!
//! # Core Concepts
//!
//! ## Taxonomy
//!
//! The navigation hierarchy of the portal:
//!
//! - **Class level** ("9".."12") -> **Subject** ("maths", "physics", ...)
//! - **Exam category** ("Unit Tests") -> **Exam type** ("Unit Test 1")
//!
//! A built-in seed is merged additively over whatever the administrators
//! have stored, so administrator edits are never lost.
//!
//! ## Catalog resolution
//!
//! [`CatalogResolver`] filters an immutable document snapshot down to the
//! documents for one (class, subject, exam slug) path, honoring document
//! visibility, and computes the badge counts for the subject menu.

pub mod catalog;
pub mod core;
pub mod taxonomy;

// Re-export commonly used types
pub use catalog::{
    counts::{CategoryCount, CategoryCounts, TypeCount},
    document::{
        Document, DocumentId, DocumentMetadata, Engagement, PendingDocument, find_document,
        next_document_id,
    },
    exam_slug::ExamSlug,
    resolver::{CatalogQuery, CatalogResolver},
};
pub use crate::core::{
    error::DomainError,
    identifier::{ClassId, SubjectId},
    slug::{display_name_from_slug, slugify},
};
pub use taxonomy::{
    entities::{
        ClassLevel, ExamCategory, PRACTICAL_SUBJECT_NAMES, Subject, Taxonomy,
        is_practical_capable,
    },
    merge::MergeReport,
    ordering::{CATEGORY_PRIORITY, PRACTICAL_CATEGORY},
    seed::{default_exam_categories, seed_classes, seed_taxonomy},
};
