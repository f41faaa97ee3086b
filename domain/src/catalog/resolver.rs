//! Catalog resolution: navigation path -> matching documents.
//!
//! The resolver is a pure function over a taxonomy and a document
//! snapshot. It never mutates either and holds no state between calls,
//! so one snapshot can serve any number of concurrent resolutions.
//!
//! A document belongs to a (class, subject) pair when its class level
//! equals the class id and either its subject id equals the subject id
//! or its denormalized subject name equals the subject's current display
//! name. The name fallback keeps documents reachable after a subject is
//! recoded.

use crate::catalog::counts::{CategoryCount, CategoryCounts, TypeCount};
use crate::catalog::document::Document;
use crate::catalog::exam_slug::ExamSlug;
use crate::core::error::DomainError;
use crate::core::identifier::{ClassId, SubjectId};
use crate::taxonomy::entities::{Subject, Taxonomy};

/// A navigation request: class, subject, optional exam slug, viewer role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub exam_slug: Option<ExamSlug>,
    pub is_admin: bool,
}

impl CatalogQuery {
    pub fn new(class_id: impl Into<ClassId>, subject_id: impl Into<SubjectId>) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            exam_slug: None,
            is_admin: false,
        }
    }

    pub fn with_exam_slug(mut self, slug: Option<ExamSlug>) -> Self {
        self.exam_slug = slug;
        self
    }

    pub fn as_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

/// Resolves navigation paths against one taxonomy snapshot.
#[derive(Debug, Clone, Copy)]
pub struct CatalogResolver<'t> {
    taxonomy: &'t Taxonomy,
}

/// The validated (class, subject) part of a query.
struct SubjectScope<'t> {
    class_id: &'t ClassId,
    subject: &'t Subject,
}

impl SubjectScope<'_> {
    fn contains(&self, document: &Document) -> bool {
        &document.class_level == self.class_id
            && (document.subject_id.as_ref() == Some(&self.subject.id)
                || document.subject_name.as_deref() == Some(self.subject.name.as_str()))
    }
}

impl<'t> CatalogResolver<'t> {
    pub fn new(taxonomy: &'t Taxonomy) -> Self {
        Self { taxonomy }
    }

    fn scope(&self, class_id: &ClassId, subject_id: &SubjectId) -> Result<SubjectScope<'t>, DomainError> {
        let class = self
            .taxonomy
            .class(class_id)
            .ok_or_else(|| DomainError::ClassNotFound(class_id.clone()))?;
        let subject = class
            .subject(subject_id)
            .ok_or_else(|| DomainError::SubjectNotFound {
                class: class_id.clone(),
                subject: subject_id.clone(),
            })?;
        Ok(SubjectScope {
            class_id: &class.id,
            subject,
        })
    }

    /// Display name of the subject addressed by a query.
    pub fn subject_name(&self, class_id: &ClassId, subject_id: &SubjectId) -> Result<&'t str, DomainError> {
        Ok(self.scope(class_id, subject_id)?.subject.name.as_str())
    }

    /// Documents matching `query`, in snapshot order.
    ///
    /// Fails with a not-found error when the class or subject is unknown.
    /// No matches is an empty result, not an error.
    pub fn resolve<'d>(
        &self,
        documents: &'d [Document],
        query: &CatalogQuery,
    ) -> Result<Vec<&'d Document>, DomainError> {
        let scope = self.scope(&query.class_id, &query.subject_id)?;
        Ok(documents
            .iter()
            .filter(|d| d.is_visible_to(query.is_admin))
            .filter(|d| scope.contains(d))
            .filter(|d| {
                query
                    .exam_slug
                    .as_ref()
                    .is_none_or(|slug| slug.matches(&d.exam_type))
            })
            .collect())
    }

    /// Per-category and per-type counts for the subject's menu.
    ///
    /// Uses the same predicate as [`resolve`](Self::resolve) with each exam
    /// type's own slug, so a badge count always equals the length of the
    /// list that the badge links to. A category total counts each document
    /// once, even if its label matches several types of the category.
    pub fn counts_by_category(
        &self,
        documents: &[Document],
        class_id: &ClassId,
        subject_id: &SubjectId,
        is_admin: bool,
    ) -> Result<CategoryCounts, DomainError> {
        let scope = self.scope(class_id, subject_id)?;
        let in_scope: Vec<&Document> = documents
            .iter()
            .filter(|d| d.is_visible_to(is_admin))
            .filter(|d| scope.contains(d))
            .collect();

        let categories = self
            .taxonomy
            .categories_for_subject(scope.subject)
            .into_iter()
            .map(|category| {
                let slugs: Vec<Option<ExamSlug>> = category
                    .types
                    .iter()
                    .map(|name| ExamSlug::for_exam_type(name))
                    .collect();

                let types = category
                    .types
                    .iter()
                    .zip(&slugs)
                    .map(|(name, slug)| TypeCount {
                        exam_type: name.clone(),
                        slug: slug.as_ref().map(|s| s.as_str().to_string()).unwrap_or_default(),
                        count: slug.as_ref().map_or(0, |slug| {
                            in_scope.iter().filter(|d| slug.matches(&d.exam_type)).count()
                        }),
                    })
                    .collect();

                let total = in_scope
                    .iter()
                    .filter(|d| slugs.iter().flatten().any(|slug| slug.matches(&d.exam_type)))
                    .count();

                CategoryCount {
                    category: category.name.clone(),
                    types,
                    total,
                }
            })
            .collect();

        Ok(CategoryCounts::new(categories))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::document::{DocumentId, DocumentMetadata, Engagement};
    use crate::taxonomy::entities::{ClassLevel, ExamCategory};
    use crate::taxonomy::seed;

    fn doc(
        id: u64,
        class: &str,
        subject_id: Option<&str>,
        subject_name: Option<&str>,
        exam_type: &str,
        visible: bool,
    ) -> Document {
        Document {
            id: DocumentId::new(id),
            class_level: ClassId::new(class),
            subject_id: subject_id.map(SubjectId::new),
            subject_name: subject_name.map(str::to_string),
            exam_type: exam_type.to_string(),
            year: "2024".to_string(),
            visible,
            engagement: Engagement::default(),
            metadata: DocumentMetadata {
                title: format!("doc {id}"),
                file_ref: format!("{id}.pdf"),
                ..Default::default()
            },
            uploaded_at: None,
        }
    }

    fn ids(documents: &[&Document]) -> Vec<u64> {
        documents.iter().map(|d| d.id.value()).collect()
    }

    fn query(class: &str, subject: &str, slug: Option<&str>, admin: bool) -> CatalogQuery {
        CatalogQuery::new(class, subject)
            .with_exam_slug(slug.and_then(ExamSlug::parse))
            .as_admin(admin)
    }

    // ==================== Scenario ====================

    fn science_docs() -> Vec<Document> {
        vec![
            doc(1, "10", None, Some("Science"), "Unit Test 1", true),
            doc(2, "10", None, Some("Science"), "Annual Exam", false),
        ]
    }

    #[test]
    fn unit_test_slug_returns_only_first_document() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = science_docs();
        let result = resolver
            .resolve(&docs, &query("10", "science", Some("unit-test-1"), false))
            .unwrap();
        assert_eq!(ids(&result), vec![1]);
    }

    #[test]
    fn hidden_annual_exam_is_admin_only() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = science_docs();

        let visitor = resolver
            .resolve(&docs, &query("10", "science", Some("annual-exam"), false))
            .unwrap();
        assert!(visitor.is_empty());

        let admin = resolver
            .resolve(&docs, &query("10", "science", Some("annual-exam"), true))
            .unwrap();
        assert_eq!(ids(&admin), vec![2]);
    }

    #[test]
    fn unknown_subject_is_not_found() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let err = resolver
            .resolve(&[], &query("9", "astrology", None, false))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, DomainError::SubjectNotFound { .. }));
    }

    #[test]
    fn unknown_class_is_not_found() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let err = resolver
            .resolve(&[], &query("13", "maths", None, true))
            .unwrap_err();
        assert_eq!(err, DomainError::ClassNotFound(ClassId::new("13")));
    }

    // ==================== Subject matching ====================

    #[test]
    fn matches_by_name_when_id_missing_or_stale() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(1, "11", None, Some("Physics"), "Quarterly Exam", true),
            doc(2, "11", Some("phy-old"), Some("Physics"), "Quarterly Exam", true),
            doc(3, "11", Some("physics"), None, "Quarterly Exam", true),
            doc(4, "11", Some("chemistry"), Some("Chemistry"), "Quarterly Exam", true),
        ];
        let result = resolver
            .resolve(&docs, &query("11", "physics", None, false))
            .unwrap();
        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn class_must_match_even_when_subject_matches() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(1, "11", Some("physics"), Some("Physics"), "Annual Exam", true),
            doc(2, "12", Some("physics"), Some("Physics"), "Annual Exam", true),
        ];
        let result = resolver
            .resolve(&docs, &query("12", "physics", None, false))
            .unwrap();
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn numeric_class_level_from_storage_matches() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let stored: Document = serde_json::from_str(
            r#"{"id": 1, "class_level": 9, "subject_id": "maths", "exam_type": "Unit Test 2",
                "year": "2022", "title": "UT2", "file_ref": "ut2.pdf"}"#,
        )
        .unwrap();
        let docs = vec![stored];
        let result = resolver
            .resolve(&docs, &query("9", "maths", Some("unit-test"), false))
            .unwrap();
        assert_eq!(ids(&result), vec![1]);
    }

    // ==================== Slug matching ====================

    #[test]
    fn category_slug_matches_all_numbered_types_in_order() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(5, "10", Some("maths"), None, "Unit Test 3", true),
            doc(2, "10", Some("maths"), None, "Midterm Test 1", true),
            doc(9, "10", Some("maths"), None, "Unit Test 1", true),
        ];
        let result = resolver
            .resolve(&docs, &query("10", "maths", Some("unit-test"), false))
            .unwrap();
        assert_eq!(ids(&result), vec![5, 9]);
    }

    #[test]
    fn no_slug_returns_every_visible_document() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(1, "10", Some("maths"), None, "Unit Test 3", true),
            doc(2, "10", Some("maths"), None, "Midterm Test 1", false),
            doc(3, "10", Some("maths"), None, "Annual Exam", true),
        ];
        let result = resolver
            .resolve(&docs, &query("10", "maths", None, false))
            .unwrap();
        assert_eq!(ids(&result), vec![1, 3]);
    }

    // ==================== Counts ====================

    #[test]
    fn counts_agree_with_resolve_for_every_type() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(1, "10", Some("science"), None, "Unit Test 1", true),
            doc(2, "10", Some("science"), None, "Unit Test 1", false),
            doc(3, "10", None, Some("Science"), "Unit Test 2", true),
            doc(4, "10", Some("science"), None, "Public Exam", true),
            doc(5, "10", Some("science"), None, "Practical Exam", true),
            doc(6, "9", Some("science"), None, "Unit Test 1", true),
        ];

        for is_admin in [false, true] {
            let counts = resolver
                .counts_by_category(&docs, &ClassId::new("10"), &SubjectId::new("science"), is_admin)
                .unwrap();
            for category in counts.categories() {
                for entry in &category.types {
                    let listed = resolver
                        .resolve(&docs, &query("10", "science", Some(entry.slug.as_str()), is_admin))
                        .unwrap();
                    assert_eq!(entry.count, listed.len(), "{} admin={}", entry.exam_type, is_admin);
                }
            }
        }
    }

    #[test]
    fn counts_totals_per_category() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![
            doc(1, "10", Some("science"), None, "Unit Test 1", true),
            doc(2, "10", Some("science"), None, "Unit Test 1", false),
            doc(3, "10", None, Some("Science"), "Unit Test 2", true),
            doc(4, "10", Some("science"), None, "Public Exam", true),
        ];
        let counts = resolver
            .counts_by_category(&docs, &ClassId::new("10"), &SubjectId::new("science"), false)
            .unwrap();

        assert_eq!(counts.total("Unit Tests"), Some(2));
        assert_eq!(counts.count("Unit Tests", "Unit Test 1"), Some(1));
        assert_eq!(counts.count("Unit Tests", "Unit Test 5"), Some(0));
        assert_eq!(counts.total("Annual Exam"), Some(1));
        assert_eq!(counts.total("Practical Exam"), Some(0));
        assert_eq!(counts.total("Quarterly Exam"), Some(0));

        let admin = resolver
            .counts_by_category(&docs, &ClassId::new("10"), &SubjectId::new("science"), true)
            .unwrap();
        assert_eq!(admin.total("Unit Tests"), Some(3));
    }

    #[test]
    fn counts_exclude_practical_for_theory_subject() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![doc(1, "10", Some("maths"), None, "Practical Exam", true)];
        let counts = resolver
            .counts_by_category(&docs, &ClassId::new("10"), &SubjectId::new("maths"), true)
            .unwrap();
        assert!(counts.category("Practical Exam").is_none());
        assert_eq!(counts.categories().len(), 5);
        assert_eq!(counts.categories()[4].category, "Annual Exam");
    }

    #[test]
    fn category_total_counts_overlapping_document_once() {
        let taxonomy = Taxonomy::new(
            vec![{
                let mut class = ClassLevel::new("9");
                class.add_subject(Subject::new("maths", "Mathematics")).unwrap();
                class
            }],
            vec![ExamCategory::new("Unit Tests", ["Unit Test 1", "Unit Test 10"])],
        );
        let resolver = CatalogResolver::new(&taxonomy);
        let docs = vec![doc(1, "9", Some("maths"), None, "Unit Test 10", true)];
        let counts = resolver
            .counts_by_category(&docs, &ClassId::new("9"), &SubjectId::new("maths"), false)
            .unwrap();
        assert_eq!(counts.count("Unit Tests", "Unit Test 1"), Some(1));
        assert_eq!(counts.count("Unit Tests", "Unit Test 10"), Some(1));
        assert_eq!(counts.total("Unit Tests"), Some(1));
    }

    #[test]
    fn counts_for_unknown_subject_is_not_found() {
        let taxonomy = seed::seed_taxonomy();
        let resolver = CatalogResolver::new(&taxonomy);
        assert!(resolver
            .counts_by_category(&[], &ClassId::new("10"), &SubjectId::new("csc"), false)
            .unwrap_err()
            .is_not_found());
    }
}
