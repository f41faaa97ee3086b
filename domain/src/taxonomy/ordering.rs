//! Menu ordering for exam categories.
//!
//! Annual Exam deliberately sorts ahead of Practical Exam even though the
//! built-in category list defines Practical first.

use crate::taxonomy::entities::ExamCategory;

/// Name of the category gated by [`crate::Subject::has_practical`].
pub const PRACTICAL_CATEGORY: &str = "Practical Exam";

/// Canonical category names, highest priority first.
pub const CATEGORY_PRIORITY: &[&str] = &[
    "Unit Tests",
    "Midterm Tests",
    "Quarterly Exam",
    "Half Yearly Exam",
    "Annual Exam",
    PRACTICAL_CATEGORY,
];

/// Position of a category name in [`CATEGORY_PRIORITY`] (case-insensitive).
pub fn canonical_priority(name: &str) -> Option<u32> {
    let name = name.trim();
    CATEGORY_PRIORITY
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(name))
        .map(|index| index as u32)
}

/// Sort categories by priority. Unprioritized categories go last and keep
/// their relative order.
pub fn sorted_by_priority(categories: &[ExamCategory]) -> Vec<&ExamCategory> {
    let mut sorted: Vec<&ExamCategory> = categories.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|category| category.sort_priority().unwrap_or(u32::MAX));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(categories: &[&'a ExamCategory]) -> Vec<&'a str> {
        categories.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_canonical_priority_lookup() {
        assert_eq!(canonical_priority("Unit Tests"), Some(0));
        assert_eq!(canonical_priority("annual exam"), Some(4));
        assert_eq!(canonical_priority("Practical Exam"), Some(5));
        assert_eq!(canonical_priority("Olympiad"), None);
    }

    #[test]
    fn test_annual_sorts_before_practical() {
        let categories = vec![
            ExamCategory::new("Practical Exam", ["Practical Exam"]),
            ExamCategory::new("Annual Exam", ["Annual Exam", "Public Exam"]),
        ];
        assert_eq!(
            names(&sorted_by_priority(&categories)),
            vec!["Annual Exam", "Practical Exam"]
        );
    }

    #[test]
    fn test_unlisted_categories_sort_last_and_stable() {
        let categories = vec![
            ExamCategory::new("Olympiad", ["Olympiad"]),
            ExamCategory::new("Annual Exam", ["Annual Exam"]),
            ExamCategory::new("Revision Test", ["Revision Test 1"]),
            ExamCategory::new("Unit Tests", ["Unit Test 1"]),
        ];
        assert_eq!(
            names(&sorted_by_priority(&categories)),
            vec!["Unit Tests", "Annual Exam", "Olympiad", "Revision Test"]
        );
    }

    #[test]
    fn test_explicit_priority_wins() {
        let categories = vec![
            ExamCategory::new("Unit Tests", ["Unit Test 1"]),
            ExamCategory::new("Olympiad", ["Olympiad"]).with_priority(0),
        ];
        // equal priority keeps stored order
        assert_eq!(
            names(&sorted_by_priority(&categories)),
            vec!["Unit Tests", "Olympiad"]
        );

        let categories = vec![
            ExamCategory::new("Quarterly Exam", ["Quarterly Exam"]),
            ExamCategory::new("Olympiad", ["Olympiad"]).with_priority(1),
        ];
        assert_eq!(
            names(&sorted_by_priority(&categories)),
            vec!["Olympiad", "Quarterly Exam"]
        );
    }
}
