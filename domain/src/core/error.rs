//! Domain error types

use crate::catalog::document::DocumentId;
use crate::core::identifier::{ClassId, SubjectId};
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Class not found: {0}")]
    ClassNotFound(ClassId),

    #[error("Subject not found: '{subject}' in class {class}")]
    SubjectNotFound { class: ClassId, subject: SubjectId },

    #[error("Document not found: {0}")]
    DocumentNotFound(DocumentId),

    #[error("Subject '{subject}' already exists in class {class}")]
    DuplicateSubject { class: ClassId, subject: SubjectId },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl DomainError {
    /// Check if this error means the requested navigation path does not exist.
    ///
    /// Hidden documents requested by a visitor report as not found too.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DomainError::ClassNotFound(_)
                | DomainError::SubjectNotFound { .. }
                | DomainError::DocumentNotFound(_)
        )
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}
