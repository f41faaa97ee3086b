//! Taxonomy provider use case.
//!
//! Produces the canonical hierarchy by loading the stored taxonomy and
//! reconciling it with the built-in seed:
//!
//! 1. **Nothing stored**: materialize the seed and store it
//! 2. **Stored**: insert seed classes/subjects that are missing, store the
//!    result only if something was added
//! 3. **Stored but unreadable**: serve the seed without touching storage,
//!    so the damaged file stays available for repair

use crate::ports::store_error::StoreError;
use crate::ports::taxonomy_store::TaxonomyStore;
use crate::use_cases::error::CatalogError;
use exam_catalog_domain::{ClassId, ExamCategory, Subject, SubjectId, Taxonomy, seed_taxonomy};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Use case serving the class/subject/category hierarchy.
pub struct TaxonomyUseCase<S: TaxonomyStore> {
    store: Arc<S>,
    // serializes read-modify-write cycles of administrative edits
    write_lock: Mutex<()>,
}

/// Outcome of loading the stored taxonomy.
enum Loaded {
    Stored(Taxonomy),
    /// The seed, served because the stored taxonomy could not be decoded.
    Fallback(Taxonomy, StoreError),
}

impl Loaded {
    fn into_taxonomy(self) -> Taxonomy {
        match self {
            Loaded::Stored(taxonomy) | Loaded::Fallback(taxonomy, _) => taxonomy,
        }
    }
}

impl<S: TaxonomyStore + 'static> TaxonomyUseCase<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    async fn load_reconciled(&self) -> Result<Loaded, CatalogError> {
        match self.store.load().await {
            Ok(None) => {
                info!("No stored taxonomy, materializing built-in seed");
                let taxonomy = seed_taxonomy();
                self.store.save(&taxonomy).await?;
                Ok(Loaded::Stored(taxonomy))
            }
            Ok(Some(mut taxonomy)) => {
                let report = taxonomy.reconcile();
                if report.is_empty() {
                    debug!("Stored taxonomy already contains the seed");
                } else {
                    info!(
                        added_classes = report.added_classes.len(),
                        added_subjects = report.added_subjects.len(),
                        restored_categories = report.restored_categories,
                        "Reconciled stored taxonomy with built-in seed"
                    );
                    self.store.save(&taxonomy).await?;
                }
                Ok(Loaded::Stored(taxonomy))
            }
            Err(e @ StoreError::Corrupt { .. }) => {
                warn!("Stored taxonomy is unreadable, serving built-in seed: {}", e);
                Ok(Loaded::Fallback(seed_taxonomy(), e))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The reconciled hierarchy. Never fails on damaged stored data.
    pub async fn hierarchy(&self) -> Result<Taxonomy, CatalogError> {
        Ok(self.load_reconciled().await?.into_taxonomy())
    }

    /// Exam categories in menu order.
    pub async fn exam_categories(&self) -> Result<Vec<ExamCategory>, CatalogError> {
        let taxonomy = self.hierarchy().await?;
        Ok(taxonomy.exam_categories().into_iter().cloned().collect())
    }

    /// Exam categories that apply to one subject, in menu order.
    pub async fn categories_for_subject(
        &self,
        class_id: &ClassId,
        subject_id: &SubjectId,
    ) -> Result<Vec<ExamCategory>, CatalogError> {
        let taxonomy = self.hierarchy().await?;
        let subject = taxonomy.subject(class_id, subject_id)?;
        Ok(taxonomy
            .categories_for_subject(subject)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Add a subject to a class and store the taxonomy.
    ///
    /// Refuses to run over an unreadable stored taxonomy, since saving
    /// would replace it.
    pub async fn add_subject(
        &self,
        class_id: &ClassId,
        subject: Subject,
        is_admin: bool,
    ) -> Result<Taxonomy, CatalogError> {
        if !is_admin {
            return Err(CatalogError::AdminRequired("add subjects"));
        }

        let _guard = self.write_lock.lock().await;
        let mut taxonomy = match self.load_reconciled().await? {
            Loaded::Stored(taxonomy) => taxonomy,
            Loaded::Fallback(_, e) => return Err(e.into()),
        };

        let subject_id = subject.id.clone();
        taxonomy.add_subject(class_id, subject)?;
        self.store.save(&taxonomy).await?;
        info!(class = %class_id, subject = %subject_id, "Added subject");
        Ok(taxonomy)
    }
}
