//! Document catalog: documents, exam slugs and the resolver that filters
//! a document snapshot down to one navigation path.

pub mod counts;
pub mod document;
pub mod exam_slug;
pub mod resolver;
