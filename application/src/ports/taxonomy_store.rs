//! Taxonomy persistence port.

use crate::ports::store_error::StoreError;
use async_trait::async_trait;
use exam_catalog_domain::Taxonomy;

/// Port for loading and saving the curriculum taxonomy.
///
/// Adapters are expected to fill keys missing from the stored form with
/// defaults (a class without a name, a subject stored as a bare name) and
/// only report [`StoreError::Corrupt`] when nothing can be decoded.
#[async_trait]
pub trait TaxonomyStore: Send + Sync {
    /// Load the stored taxonomy, or `None` when nothing has been stored yet.
    async fn load(&self) -> Result<Option<Taxonomy>, StoreError>;

    /// Replace the stored taxonomy.
    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), StoreError>;
}
