//! Administrative document operations: registration and visibility.

use crate::ports::document_repository::DocumentRepository;
use crate::ports::taxonomy_store::TaxonomyStore;
use crate::use_cases::error::CatalogError;
use crate::use_cases::taxonomy::TaxonomyUseCase;
use chrono::Utc;
use exam_catalog_domain::{
    ClassId, Document, DocumentId, DocumentMetadata, DomainError, PendingDocument, SubjectId,
};
use std::sync::Arc;
use tracing::info;

/// Input for registering an uploaded paper.
#[derive(Debug, Clone)]
pub struct RegisterDocumentInput {
    pub class_id: ClassId,
    pub subject_id: SubjectId,
    pub exam_type: String,
    pub year: String,
    pub metadata: DocumentMetadata,
    pub visible: bool,
    pub is_admin: bool,
}

/// Use case for administrator-side document management.
pub struct ManageDocumentsUseCase<S: TaxonomyStore, R: DocumentRepository> {
    taxonomy: Arc<TaxonomyUseCase<S>>,
    documents: Arc<R>,
}

impl<S: TaxonomyStore + 'static, R: DocumentRepository + 'static> ManageDocumentsUseCase<S, R> {
    pub fn new(taxonomy: Arc<TaxonomyUseCase<S>>, documents: Arc<R>) -> Self {
        Self {
            taxonomy,
            documents,
        }
    }

    /// Register a document under an existing class and subject.
    ///
    /// The subject's current display name is stored alongside its id.
    pub async fn register(&self, input: RegisterDocumentInput) -> Result<Document, CatalogError> {
        if !input.is_admin {
            return Err(CatalogError::AdminRequired("register documents"));
        }

        let taxonomy = self.taxonomy.hierarchy().await?;
        let subject = taxonomy.subject(&input.class_id, &input.subject_id)?;

        let pending = PendingDocument {
            class_level: input.class_id,
            subject_id: subject.id.clone(),
            subject_name: subject.name.clone(),
            exam_type: input.exam_type.trim().to_string(),
            year: input.year.trim().to_string(),
            visible: input.visible,
            metadata: input.metadata,
            uploaded_at: Utc::now(),
        };
        pending.validate()?;

        let document = self.documents.insert(pending).await?;
        info!(
            id = %document.id,
            class = %document.class_level,
            exam_type = %document.exam_type,
            "Registered document"
        );
        Ok(document)
    }

    /// Publish or hide a document.
    pub async fn set_visibility(
        &self,
        id: DocumentId,
        visible: bool,
        is_admin: bool,
    ) -> Result<Document, CatalogError> {
        if !is_admin {
            return Err(CatalogError::AdminRequired("change document visibility"));
        }

        let document = self
            .documents
            .set_visibility(id, visible)
            .await?
            .ok_or(DomainError::DocumentNotFound(id))?;
        info!(id = %id, visible, "Changed document visibility");
        Ok(document)
    }
}
