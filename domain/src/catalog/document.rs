//! Document entity and its value objects.

use crate::core::error::DomainError;
use crate::core::identifier::{ClassId, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, monotonically assigned document identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(u64);

impl DocumentId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one, or `None` past `u64::MAX`.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DocumentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Like / dislike counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engagement {
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
}

/// Descriptive metadata of an uploaded file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Display title.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to the stored file (opaque to the catalog).
    pub file_ref: String,
    /// Human-readable size label ("1.2 MB").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

/// An uploaded exam paper.
///
/// A document may reference its subject by id, by denormalized display
/// name, or both; the resolver treats either as a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub class_level: ClassId,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    #[serde(default)]
    pub subject_name: Option<String>,
    /// Free-text exam label ("Unit Test 1").
    pub exam_type: String,
    pub year: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub engagement: Engagement,
    #[serde(flatten)]
    pub metadata: DocumentMetadata,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

fn default_visible() -> bool {
    true
}

impl Document {
    /// Visitors only see visible documents; administrators see everything.
    pub fn is_visible_to(&self, is_admin: bool) -> bool {
        is_admin || self.visible
    }
}

/// A document awaiting an identifier from the repository.
///
/// Built by the registration use case once the class and subject are
/// validated; the repository assigns the id when it persists the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDocument {
    pub class_level: ClassId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub exam_type: String,
    pub year: String,
    pub visible: bool,
    pub metadata: DocumentMetadata,
    pub uploaded_at: DateTime<Utc>,
}

impl PendingDocument {
    /// Check required free-text fields.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.exam_type.trim().is_empty() {
            return Err(DomainError::invalid("exam_type", "must not be empty"));
        }
        if self.year.trim().is_empty() {
            return Err(DomainError::invalid("year", "must not be empty"));
        }
        if self.metadata.file_ref.trim().is_empty() {
            return Err(DomainError::invalid("file_ref", "must not be empty"));
        }
        Ok(())
    }

    pub fn into_document(self, id: DocumentId) -> Document {
        Document {
            id,
            class_level: self.class_level,
            subject_id: Some(self.subject_id),
            subject_name: Some(self.subject_name),
            exam_type: self.exam_type,
            year: self.year,
            visible: self.visible,
            engagement: Engagement::default(),
            metadata: self.metadata,
            uploaded_at: Some(self.uploaded_at),
        }
    }
}

/// Find a document by id, hiding invisible documents from visitors.
pub fn find_document(
    documents: &[Document],
    id: DocumentId,
    is_admin: bool,
) -> Result<&Document, DomainError> {
    documents
        .iter()
        .find(|d| d.id == id)
        .filter(|d| d.is_visible_to(is_admin))
        .ok_or(DomainError::DocumentNotFound(id))
}

/// Next free identifier after every id in use.
///
/// `None` when the largest id in use is already `u64::MAX`.
pub fn next_document_id(ids: impl IntoIterator<Item = DocumentId>) -> Option<DocumentId> {
    match ids.into_iter().max() {
        Some(max) => max.next(),
        None => Some(DocumentId::new(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PendingDocument {
        PendingDocument {
            class_level: ClassId::new("12"),
            subject_id: SubjectId::new("physics"),
            subject_name: "Physics".to_string(),
            exam_type: "Quarterly Exam".to_string(),
            year: "2024".to_string(),
            visible: true,
            metadata: DocumentMetadata {
                title: "Physics Quarterly 2024".to_string(),
                file_ref: "uploads/phy-q-2024.pdf".to_string(),
                ..Default::default()
            },
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{
            "id": 3,
            "class_level": 10,
            "exam_type": "Unit Test 1",
            "year": "2023",
            "title": "UT1",
            "file_ref": "ut1.pdf"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.class_level, ClassId::new("10"));
        assert!(doc.visible);
        assert_eq!(doc.engagement, Engagement::default());
        assert!(doc.subject_id.is_none());
        assert_eq!(doc.metadata.title, "UT1");
    }

    #[test]
    fn test_visibility_gate() {
        let mut doc = pending().into_document(DocumentId::new(1));
        assert!(doc.is_visible_to(false));
        doc.visible = false;
        assert!(!doc.is_visible_to(false));
        assert!(doc.is_visible_to(true));
    }

    #[test]
    fn test_find_document_hides_invisible_from_visitors() {
        let mut hidden = pending().into_document(DocumentId::new(2));
        hidden.visible = false;
        let docs = vec![pending().into_document(DocumentId::new(1)), hidden];

        assert!(find_document(&docs, DocumentId::new(1), false).is_ok());
        assert_eq!(
            find_document(&docs, DocumentId::new(2), false),
            Err(DomainError::DocumentNotFound(DocumentId::new(2)))
        );
        assert!(find_document(&docs, DocumentId::new(2), true).is_ok());
        assert!(find_document(&docs, DocumentId::new(9), true).is_err());
    }

    #[test]
    fn test_next_document_id() {
        assert_eq!(next_document_id([]), Some(DocumentId::new(1)));
        let docs = vec![
            pending().into_document(DocumentId::new(7)),
            pending().into_document(DocumentId::new(3)),
        ];
        assert_eq!(
            next_document_id(docs.iter().map(|d| d.id)),
            Some(DocumentId::new(8))
        );
    }

    #[test]
    fn test_next_document_id_does_not_overflow() {
        assert_eq!(DocumentId::new(u64::MAX).next(), None);
        assert_eq!(
            next_document_id([DocumentId::new(2), DocumentId::new(u64::MAX)]),
            None
        );
    }

    #[test]
    fn test_pending_validation() {
        assert!(pending().validate().is_ok());

        let mut missing_year = pending();
        missing_year.year = "  ".to_string();
        assert!(matches!(
            missing_year.validate(),
            Err(DomainError::InvalidValue { field: "year", .. })
        ));
    }

    #[test]
    fn test_into_document_denormalizes_subject() {
        let doc = pending().into_document(DocumentId::new(5));
        assert_eq!(doc.subject_id, Some(SubjectId::new("physics")));
        assert_eq!(doc.subject_name.as_deref(), Some("Physics"));
        assert!(doc.uploaded_at.is_some());
    }
}
