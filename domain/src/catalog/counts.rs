//! Menu badge counts.

use serde::Serialize;

/// Number of documents filed under one exam type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub exam_type: String,
    pub slug: String,
    pub count: usize,
}

/// Counts for one exam category and its types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub types: Vec<TypeCount>,
    /// Distinct documents matching any type of the category.
    pub total: usize,
}

/// Count table for a subject menu, in menu order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryCounts(Vec<CategoryCount>);

impl CategoryCounts {
    pub fn new(categories: Vec<CategoryCount>) -> Self {
        Self(categories)
    }

    pub fn categories(&self) -> &[CategoryCount] {
        &self.0
    }

    pub fn category(&self, name: &str) -> Option<&CategoryCount> {
        self.0.iter().find(|c| c.category == name)
    }

    pub fn total(&self, category: &str) -> Option<usize> {
        self.category(category).map(|c| c.total)
    }

    pub fn count(&self, category: &str, exam_type: &str) -> Option<usize> {
        self.category(category)?
            .types
            .iter()
            .find(|t| t.exam_type == exam_type)
            .map(|t| t.count)
    }

    /// True when no category has any document.
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|c| c.total == 0)
    }
}
