//! Browse catalog use case.
//!
//! Answers the portal's read-only navigation: a subject's exam menu with
//! badge counts, the document list behind one menu entry, and a single
//! document's detail. Every answer is computed from one taxonomy snapshot
//! and one document snapshot.

use crate::ports::document_repository::DocumentRepository;
use crate::ports::taxonomy_store::TaxonomyStore;
use crate::use_cases::error::CatalogError;
use crate::use_cases::taxonomy::TaxonomyUseCase;
use exam_catalog_domain::{
    CatalogQuery, CatalogResolver, CategoryCounts, ClassId, Document, DocumentId, ExamSlug,
    Subject, SubjectId, find_document,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Input for a catalog listing.
#[derive(Debug, Clone)]
pub struct BrowseInput {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    /// Raw slug from the navigation path; blank means "all exam types".
    pub exam_slug: Option<String>,
    pub is_admin: bool,
}

impl BrowseInput {
    pub fn new(class_id: impl Into<ClassId>, subject_id: impl Into<SubjectId>) -> Self {
        Self {
            class_id: class_id.into(),
            subject_id: subject_id.into(),
            exam_slug: None,
            is_admin: false,
        }
    }

    pub fn with_exam_slug(mut self, slug: impl Into<String>) -> Self {
        self.exam_slug = Some(slug.into());
        self
    }

    pub fn as_admin(mut self, is_admin: bool) -> Self {
        self.is_admin = is_admin;
        self
    }
}

/// A resolved document listing.
#[derive(Debug, Clone, Serialize)]
pub struct BrowseOutput {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    /// Title-cased slug ("Unit Test"), `None` when unfiltered.
    pub exam_display_name: Option<String>,
    pub documents: Vec<Document>,
}

/// A subject's exam menu.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectMenu {
    pub class_id: ClassId,
    pub subject: Subject,
    pub counts: CategoryCounts,
}

/// Use case for read-only catalog navigation.
pub struct BrowseCatalogUseCase<S: TaxonomyStore, R: DocumentRepository> {
    taxonomy: Arc<TaxonomyUseCase<S>>,
    documents: Arc<R>,
}

impl<S: TaxonomyStore + 'static, R: DocumentRepository + 'static> BrowseCatalogUseCase<S, R> {
    pub fn new(taxonomy: Arc<TaxonomyUseCase<S>>, documents: Arc<R>) -> Self {
        Self {
            taxonomy,
            documents,
        }
    }

    /// List the documents behind a navigation path.
    pub async fn browse(&self, input: BrowseInput) -> Result<BrowseOutput, CatalogError> {
        let taxonomy = self.taxonomy.hierarchy().await?;
        let snapshot = self.documents.snapshot().await?;
        let resolver = CatalogResolver::new(&taxonomy);

        let exam_slug = input.exam_slug.as_deref().and_then(ExamSlug::parse);
        let exam_display_name = exam_slug.as_ref().map(ExamSlug::display_name);
        let query = CatalogQuery::new(input.class_id.clone(), input.subject_id.clone())
            .with_exam_slug(exam_slug)
            .as_admin(input.is_admin);

        let documents: Vec<Document> = resolver
            .resolve(&snapshot, &query)?
            .into_iter()
            .cloned()
            .collect();
        let subject_name = resolver
            .subject_name(&input.class_id, &input.subject_id)?
            .to_string();

        debug!(
            class = %input.class_id,
            subject = %input.subject_id,
            slug = ?query.exam_slug,
            matched = documents.len(),
            "Resolved catalog listing"
        );

        Ok(BrowseOutput {
            class_id: input.class_id,
            subject_id: input.subject_id,
            subject_name,
            exam_display_name,
            documents,
        })
    }

    /// The exam menu of one subject, with a count badge per entry.
    pub async fn menu(
        &self,
        class_id: &ClassId,
        subject_id: &SubjectId,
        is_admin: bool,
    ) -> Result<SubjectMenu, CatalogError> {
        let taxonomy = self.taxonomy.hierarchy().await?;
        let snapshot = self.documents.snapshot().await?;
        let subject = taxonomy.subject(class_id, subject_id)?.clone();
        let counts = CatalogResolver::new(&taxonomy).counts_by_category(
            &snapshot, class_id, subject_id, is_admin,
        )?;

        Ok(SubjectMenu {
            class_id: class_id.clone(),
            subject,
            counts,
        })
    }

    /// One document, hidden from visitors while unpublished.
    pub async fn document(&self, id: DocumentId, is_admin: bool) -> Result<Document, CatalogError> {
        let snapshot = self.documents.snapshot().await?;
        Ok(find_document(&snapshot, id, is_admin)?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::memory::{InMemoryDocumentRepository, InMemoryTaxonomyStore};
    use exam_catalog_domain::{DocumentMetadata, DomainError, Engagement};

    fn doc(id: u64, class: &str, subject: &str, exam_type: &str, visible: bool) -> Document {
        Document {
            id: DocumentId::new(id),
            class_level: ClassId::new(class),
            subject_id: Some(SubjectId::new(subject)),
            subject_name: None,
            exam_type: exam_type.to_string(),
            year: "2024".to_string(),
            visible,
            engagement: Engagement::default(),
            metadata: DocumentMetadata {
                title: format!("Paper {id}"),
                file_ref: format!("paper_{id}.pdf"),
                ..Default::default()
            },
            uploaded_at: None,
        }
    }

    fn use_case(
        documents: Vec<Document>,
    ) -> BrowseCatalogUseCase<InMemoryTaxonomyStore, InMemoryDocumentRepository> {
        let taxonomy = Arc::new(TaxonomyUseCase::new(Arc::new(InMemoryTaxonomyStore::new())));
        BrowseCatalogUseCase::new(
            taxonomy,
            Arc::new(InMemoryDocumentRepository::with_documents(documents)),
        )
    }

    #[tokio::test]
    async fn test_browse_filters_by_slug_and_visibility() {
        let use_case = use_case(vec![
            doc(1, "10", "maths", "Unit Test 1", true),
            doc(2, "10", "maths", "Unit Test 2", false),
            doc(3, "10", "maths", "Quarterly Exam", true),
        ]);

        let output = use_case
            .browse(BrowseInput::new("10", "maths").with_exam_slug("unit-test"))
            .await
            .unwrap();
        assert_eq!(output.subject_name, "Mathematics");
        assert_eq!(output.exam_display_name.as_deref(), Some("Unit Test"));
        let ids: Vec<u64> = output.documents.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![1]);

        let output = use_case
            .browse(
                BrowseInput::new("10", "maths")
                    .with_exam_slug("unit-test")
                    .as_admin(true),
            )
            .await
            .unwrap();
        let ids: Vec<u64> = output.documents.iter().map(|d| d.id.value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_blank_slug_lists_everything() {
        let use_case = use_case(vec![
            doc(1, "10", "maths", "Unit Test 1", true),
            doc(2, "10", "maths", "Annual Exam", true),
        ]);

        let output = use_case
            .browse(BrowseInput::new("10", "maths").with_exam_slug("   "))
            .await
            .unwrap();
        assert_eq!(output.exam_display_name, None);
        assert_eq!(output.documents.len(), 2);
    }

    #[tokio::test]
    async fn test_browse_unknown_subject_is_not_found() {
        let use_case = use_case(vec![]);
        let err = use_case
            .browse(BrowseInput::new("10", "astrology"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = use_case.browse(BrowseInput::new("13", "maths")).await.unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Domain(DomainError::ClassNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_menu_counts_agree_with_browse() {
        let use_case = use_case(vec![
            doc(1, "12", "physics", "Unit Test 1", true),
            doc(2, "12", "physics", "Practical Exam", true),
            doc(3, "12", "physics", "Annual Exam", false),
        ]);

        let menu = use_case
            .menu(&ClassId::new("12"), &SubjectId::new("physics"), false)
            .await
            .unwrap();
        assert!(menu.subject.has_practical());

        for category in menu.counts.categories() {
            for entry in &category.types {
                let listed = use_case
                    .browse(BrowseInput::new("12", "physics").with_exam_slug(entry.slug.clone()))
                    .await
                    .unwrap();
                assert_eq!(listed.documents.len(), entry.count, "{}", entry.exam_type);
            }
        }
        assert_eq!(menu.counts.total("Annual Exam"), Some(0));
        assert_eq!(menu.counts.total("Practical Exam"), Some(1));
    }

    #[tokio::test]
    async fn test_document_detail_hides_unpublished() {
        let use_case = use_case(vec![doc(7, "9", "science", "Midterm Test", false)]);

        let err = use_case.document(DocumentId::new(7), false).await.unwrap_err();
        assert!(err.is_not_found());

        let document = use_case.document(DocumentId::new(7), true).await.unwrap();
        assert_eq!(document.metadata.title, "Paper 7");
    }
}
