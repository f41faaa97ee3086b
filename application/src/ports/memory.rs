//! In-memory implementations of the persistence ports.
//!
//! Used by tests and for running against throwaway state.

use crate::ports::document_repository::DocumentRepository;
use crate::ports::store_error::StoreError;
use crate::ports::taxonomy_store::TaxonomyStore;
use async_trait::async_trait;
use exam_catalog_domain::{Document, DocumentId, PendingDocument, Taxonomy, next_document_id};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Taxonomy store backed by a lock-protected value.
#[derive(Debug, Default)]
pub struct InMemoryTaxonomyStore {
    taxonomy: RwLock<Option<Taxonomy>>,
    saves: AtomicUsize,
}

impl InMemoryTaxonomyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taxonomy(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy: RwLock::new(Some(taxonomy)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaxonomyStore for InMemoryTaxonomyStore {
    async fn load(&self) -> Result<Option<Taxonomy>, StoreError> {
        Ok(self.taxonomy.read().await.clone())
    }

    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), StoreError> {
        *self.taxonomy.write().await = Some(taxonomy.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Document repository backed by a lock-protected vector.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<Vec<Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<Document>) -> Self {
        Self {
            documents: RwLock::new(documents),
        }
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn snapshot(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.documents.read().await.clone())
    }

    async fn insert(&self, document: PendingDocument) -> Result<Document, StoreError> {
        let mut documents = self.documents.write().await;
        let id = next_document_id(documents.iter().map(|d| d.id))
            .ok_or(StoreError::IdsExhausted)?;
        let document = document.into_document(id);
        documents.push(document.clone());
        Ok(document)
    }

    async fn set_visibility(
        &self,
        id: DocumentId,
        visible: bool,
    ) -> Result<Option<Document>, StoreError> {
        let mut documents = self.documents.write().await;
        Ok(documents.iter_mut().find(|d| d.id == id).map(|d| {
            d.visible = visible;
            d.clone()
        }))
    }
}
