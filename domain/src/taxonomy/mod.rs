//! Curriculum taxonomy: class levels -> subjects, plus exam categories -> exam types.
//!
//! - [`entities`]: [`Taxonomy`], [`ClassLevel`], [`Subject`], [`ExamCategory`]
//! - [`seed`]: the built-in hierarchy
//! - [`merge`]: additive reconciliation of stored state with the seed
//! - [`ordering`]: menu priority of exam categories
//!
//! [`Taxonomy`]: entities::Taxonomy
//! [`ClassLevel`]: entities::ClassLevel
//! [`Subject`]: entities::Subject
//! [`ExamCategory`]: entities::ExamCategory

pub mod entities;
pub mod merge;
pub mod ordering;
pub mod seed;
