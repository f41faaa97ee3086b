//! Taxonomy store backed by a JSON file.

use super::records::StoredTaxonomy;
use super::{read_optional, write_atomic};
use async_trait::async_trait;
use exam_catalog_application::{StoreError, TaxonomyStore};
use exam_catalog_domain::Taxonomy;
use std::path::PathBuf;
use tracing::debug;

/// Reads and writes the taxonomy as one pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonTaxonomyStore {
    path: PathBuf,
}

impl JsonTaxonomyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TaxonomyStore for JsonTaxonomyStore {
    async fn load(&self) -> Result<Option<Taxonomy>, StoreError> {
        let Some(content) = read_optional(&self.path).await? else {
            debug!("No taxonomy file at {}", self.path.display());
            return Ok(None);
        };

        let stored: StoredTaxonomy =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
        Ok(Some(stored.into()))
    }

    async fn save(&self, taxonomy: &Taxonomy) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&StoredTaxonomy::from(taxonomy)).map_err(
            |e| StoreError::Encode {
                what: "taxonomy",
                message: e.to_string(),
            },
        )?;
        write_atomic(&self.path, &content).await?;
        debug!("Saved taxonomy to {}", self.path.display());
        Ok(())
    }
}
