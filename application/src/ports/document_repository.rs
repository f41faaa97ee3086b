//! Document persistence port.
//!
//! The repository is the single source of truth for documents. Readers get
//! a complete snapshot and never observe a partially written record;
//! concurrent inserts each receive a distinct identifier.

use crate::ports::store_error::StoreError;
use async_trait::async_trait;
use exam_catalog_domain::{Document, DocumentId, PendingDocument};

#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// All documents in creation order.
    async fn snapshot(&self) -> Result<Vec<Document>, StoreError>;

    /// Persist a new document and return it with its assigned identifier.
    async fn insert(&self, document: PendingDocument) -> Result<Document, StoreError>;

    /// Set the visibility flag. Returns `None` when no document has that id.
    async fn set_visibility(
        &self,
        id: DocumentId,
        visible: bool,
    ) -> Result<Option<Document>, StoreError>;
}
