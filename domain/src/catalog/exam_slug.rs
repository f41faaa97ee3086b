//! Exam slug value object.

use crate::core::slug::{display_name_from_slug, slugify};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized exam-category or exam-type slug taken from a navigation path.
///
/// Matching is by **substring** on the slugified document label, so the
/// category-level slug "unit-test" matches "Unit Test 1".."Unit Test 5"
/// while "unit-test-1" narrows to a single type. "unit-test-1" also
/// matches "Unit Test 10" should such a type ever exist.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamSlug(String);

impl ExamSlug {
    /// Normalize raw input. Blank input yields `None` (no exam filter).
    pub fn parse(raw: &str) -> Option<Self> {
        let slug = slugify(raw.trim());
        if slug.is_empty() { None } else { Some(Self(slug)) }
    }

    /// Slug of an exam type display name ("Unit Test 1" -> "unit-test-1").
    pub fn for_exam_type(name: &str) -> Option<Self> {
        Self::parse(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Heading shown for this slug ("unit-test-1" -> "Unit Test 1").
    pub fn display_name(&self) -> String {
        display_name_from_slug(&self.0)
    }

    /// Whether a document exam label falls under this slug.
    pub fn matches(&self, exam_label: &str) -> bool {
        slugify(exam_label).contains(self.0.as_str())
    }
}

impl fmt::Display for ExamSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_input() {
        assert_eq!(ExamSlug::parse("Unit Test 1").unwrap().as_str(), "unit-test-1");
        assert_eq!(ExamSlug::parse("  annual-exam ").unwrap().as_str(), "annual-exam");
        assert!(ExamSlug::parse("   ").is_none());
    }

    #[test]
    fn test_category_slug_matches_every_numbered_type() {
        let slug = ExamSlug::parse("unit-test").unwrap();
        for n in 1..=5 {
            assert!(slug.matches(&format!("Unit Test {n}")));
        }
        assert!(!slug.matches("Midterm Test 1"));
    }

    #[test]
    fn test_type_slug_narrows_to_one_type() {
        let slug = ExamSlug::parse("unit-test-1").unwrap();
        assert!(slug.matches("Unit Test 1"));
        assert!(!slug.matches("Unit Test 2"));
        // substring rule: a longer sibling label still matches
        assert!(slug.matches("Unit Test 10"));
    }

    #[test]
    fn test_match_is_case_insensitive_on_label() {
        let slug = ExamSlug::parse("half-yearly-exam").unwrap();
        assert!(slug.matches("HALF YEARLY EXAM"));
        assert!(!slug.matches("Half-Yearly  Exam"));
    }

    #[test]
    fn test_display_name() {
        let slug = ExamSlug::parse("public-exam").unwrap();
        assert_eq!(slug.display_name(), "Public Exam");
    }
}
