//! Built-in taxonomy seed.
//!
//! Classes 9 and 10 share the common subject set; classes 11 and 12 share
//! the higher-secondary set.

use crate::taxonomy::entities::{ClassLevel, ExamCategory, Subject, Taxonomy};

const COMMON_CLASSES: &[&str] = &["9", "10"];
const HIGHER_SECONDARY_CLASSES: &[&str] = &["11", "12"];

const COMMON_SUBJECTS: &[(&str, &str)] = &[
    ("tamil", "Tamil"),
    ("english", "English"),
    ("maths", "Mathematics"),
    ("science", "Science"),
    ("social", "Social Science"),
];

const HIGHER_SECONDARY_SUBJECTS: &[(&str, &str)] = &[
    ("tamil", "Tamil"),
    ("english", "English"),
    ("maths", "Mathematics"),
    ("physics", "Physics"),
    ("chemistry", "Chemistry"),
    ("biology", "Biology"),
    ("csc", "Computer Science"),
    ("capp", "Computer Applications"),
    ("acc", "Accountancy"),
    ("comm", "Commerce"),
    ("eco", "Economics"),
];

fn class_with_subjects(id: &str, subjects: &[(&str, &str)]) -> ClassLevel {
    let mut class = ClassLevel::new(id);
    for (subject_id, name) in subjects {
        class.insert_missing_subject(Subject::new(*subject_id, *name));
    }
    class
}

/// Built-in classes with their default subjects, in grade order.
pub fn seed_classes() -> Vec<ClassLevel> {
    COMMON_CLASSES
        .iter()
        .map(|id| class_with_subjects(id, COMMON_SUBJECTS))
        .chain(
            HIGHER_SECONDARY_CLASSES
                .iter()
                .map(|id| class_with_subjects(id, HIGHER_SECONDARY_SUBJECTS)),
        )
        .collect()
}

/// Built-in exam categories in definition order (not menu order).
pub fn default_exam_categories() -> Vec<ExamCategory> {
    vec![
        ExamCategory::new(
            "Unit Tests",
            [
                "Unit Test 1",
                "Unit Test 2",
                "Unit Test 3",
                "Unit Test 4",
                "Unit Test 5",
            ],
        ),
        ExamCategory::new("Midterm Tests", ["Midterm Test 1", "Midterm Test 2"]),
        ExamCategory::new("Quarterly Exam", ["Quarterly Exam"]),
        ExamCategory::new("Half Yearly Exam", ["Half Yearly Exam"]),
        ExamCategory::new("Practical Exam", ["Practical Exam"]),
        ExamCategory::new("Annual Exam", ["Annual Exam", "Public Exam"]),
    ]
}

/// The complete built-in taxonomy.
pub fn seed_taxonomy() -> Taxonomy {
    Taxonomy::new(seed_classes(), default_exam_categories())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identifier::{ClassId, SubjectId};

    #[test]
    fn test_seed_has_four_classes_in_grade_order() {
        let taxonomy = seed_taxonomy();
        let ids: Vec<&str> = taxonomy.classes().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["9", "10", "11", "12"]);
    }

    #[test]
    fn test_class_groups_share_subject_sets() {
        let taxonomy = seed_taxonomy();
        let nine = taxonomy.class(&ClassId::new("9")).unwrap();
        let ten = taxonomy.class(&ClassId::new("10")).unwrap();
        assert_eq!(nine.subjects(), ten.subjects());
        assert_eq!(nine.subjects().len(), 5);

        let twelve = taxonomy.class(&ClassId::new("12")).unwrap();
        assert_eq!(twelve.subjects().len(), 11);
        assert!(twelve.contains_subject(&SubjectId::new("capp")));
        assert!(!nine.contains_subject(&SubjectId::new("capp")));
    }

    #[test]
    fn test_seed_practical_classification() {
        let taxonomy = seed_taxonomy();
        let ten = taxonomy.class(&ClassId::new("10")).unwrap();
        let practical: Vec<&str> = ten
            .subjects()
            .iter()
            .filter(|s| s.has_practical())
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(practical, vec!["science"]);
    }

    #[test]
    fn test_default_categories_define_practical_before_annual() {
        let names: Vec<String> = default_exam_categories()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names[4], "Practical Exam");
        assert_eq!(names[5], "Annual Exam");
    }
}
