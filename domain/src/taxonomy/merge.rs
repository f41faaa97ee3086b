//! Additive reconciliation of a stored taxonomy against the built-in seed.
//!
//! The merge only ever inserts: classes and subjects missing from the
//! stored taxonomy are copied in from the seed, and an empty category list
//! is replaced by the defaults. Stored entries (including administrator
//! renames and additions) are never overwritten or removed. Running the
//! merge a second time is a no-op.

use crate::core::identifier::{ClassId, SubjectId};
use crate::taxonomy::entities::{ClassLevel, Taxonomy};
use crate::taxonomy::seed;

/// What a reconciliation pass inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added_classes: Vec<ClassId>,
    pub added_subjects: Vec<(ClassId, SubjectId)>,
    pub restored_categories: bool,
}

impl MergeReport {
    /// True when the stored taxonomy already contained everything.
    pub fn is_empty(&self) -> bool {
        self.added_classes.is_empty() && self.added_subjects.is_empty() && !self.restored_categories
    }
}

impl Taxonomy {
    /// Reconcile against the built-in seed.
    pub fn reconcile(&mut self) -> MergeReport {
        self.reconcile_with(&seed::seed_taxonomy())
    }

    /// Reconcile against an arbitrary seed.
    pub fn reconcile_with(&mut self, seed: &Taxonomy) -> MergeReport {
        let mut report = MergeReport::default();

        for seed_class in seed.classes() {
            match self.class_mut(&seed_class.id) {
                Some(existing) => {
                    for subject in seed_class.subjects() {
                        if existing.insert_missing_subject(subject.clone()) {
                            report
                                .added_subjects
                                .push((seed_class.id.clone(), subject.id.clone()));
                        }
                    }
                }
                None => {
                    let mut class = ClassLevel::new(seed_class.id.clone()).with_name(&seed_class.name);
                    for subject in seed_class.subjects() {
                        class.insert_missing_subject(subject.clone());
                        report
                            .added_subjects
                            .push((seed_class.id.clone(), subject.id.clone()));
                    }
                    report.added_classes.push(seed_class.id.clone());
                    self.insert_class(class);
                }
            }
        }

        if self.stored_exam_categories().is_empty() && !seed.stored_exam_categories().is_empty() {
            self.set_exam_categories(seed.stored_exam_categories().to_vec());
            report.restored_categories = true;
        }

        report
    }
}
