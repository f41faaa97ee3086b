//! Document repository backed by a JSON file.
//!
//! Every mutation re-reads the file, applies the change and writes the
//! whole file back before returning. A process-local lock orders the
//! read-modify-write cycles, so concurrent inserts get distinct ids.
//! Records that cannot be decoded are hidden from reads but written back
//! untouched, and their ids stay reserved.

use super::records::{StoredDocument, StoredDocumentFile, set_record_visibility};
use super::{read_optional, write_atomic};
use async_trait::async_trait;
use exam_catalog_application::{DocumentRepository, StoreError};
use exam_catalog_domain::{Document, DocumentId, PendingDocument};
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::debug;

pub struct JsonDocumentRepository {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonDocumentRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    async fn read_file(&self) -> Result<StoredDocumentFile, StoreError> {
        let Some(content) = read_optional(&self.path).await? else {
            return Ok(StoredDocumentFile::default());
        };

        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    async fn write_file(&self, file: &StoredDocumentFile) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(file).map_err(encode_error)?;
        write_atomic(&self.path, &content).await
    }
}

fn encode_error(e: serde_json::Error) -> StoreError {
    StoreError::Encode {
        what: "documents",
        message: e.to_string(),
    }
}

#[async_trait]
impl DocumentRepository for JsonDocumentRepository {
    async fn snapshot(&self) -> Result<Vec<Document>, StoreError> {
        let _guard = self.lock.read().await;
        Ok(self.read_file().await?.documents())
    }

    async fn insert(&self, document: PendingDocument) -> Result<Document, StoreError> {
        let _guard = self.lock.write().await;
        let mut file = self.read_file().await?;
        let id = file.next_id().ok_or(StoreError::IdsExhausted)?;
        let document = document.into_document(id);
        let record = serde_json::to_value(StoredDocument::from(&document)).map_err(encode_error)?;
        file.records_mut().push(record);
        self.write_file(&file).await?;
        debug!(id = %document.id, "Stored document in {}", self.path.display());
        Ok(document)
    }

    async fn set_visibility(
        &self,
        id: DocumentId,
        visible: bool,
    ) -> Result<Option<Document>, StoreError> {
        let _guard = self.lock.write().await;
        let mut file = self.read_file().await?;
        let Some((index, mut document)) = file.find(id) else {
            return Ok(None);
        };
        set_record_visibility(&mut file.records_mut()[index], visible);
        document.visible = visible;
        self.write_file(&file).await?;
        Ok(Some(document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use exam_catalog_domain::{ClassId, DocumentMetadata, SubjectId};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn pending(exam_type: &str) -> PendingDocument {
        PendingDocument {
            class_level: ClassId::new("9"),
            subject_id: SubjectId::new("science"),
            subject_name: "Science".to_string(),
            exam_type: exam_type.to_string(),
            year: "2024".to_string(),
            visible: true,
            metadata: DocumentMetadata {
                title: format!("{exam_type} 2024"),
                file_ref: "paper.pdf".to_string(),
                ..Default::default()
            },
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonDocumentRepository::new(dir.path().join("files.json"));
        assert!(repo.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_is_written_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.json");

        let repo = JsonDocumentRepository::new(&path);
        let first = repo.insert(pending("Unit Test 1")).await.unwrap();
        let second = repo.insert(pending("Annual Exam")).await.unwrap();
        assert_eq!(first.id, DocumentId::new(1));
        assert_eq!(second.id, DocumentId::new(2));

        let reopened = JsonDocumentRepository::new(&path);
        let documents = reopened.snapshot().await.unwrap();
        assert_eq!(documents, vec![first, second]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_get_distinct_ids() {
        let dir = TempDir::new().unwrap();
        let repo = Arc::new(JsonDocumentRepository::new(dir.path().join("files.json")));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.insert(pending("Midterm Test 1")).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id.value());
        }
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
        assert_eq!(repo.snapshot().await.unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_set_visibility_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.json");
        let repo = JsonDocumentRepository::new(&path);
        let document = repo.insert(pending("Quarterly Exam")).await.unwrap();

        let hidden = repo.set_visibility(document.id, false).await.unwrap().unwrap();
        assert!(!hidden.visible);
        assert!(repo.set_visibility(DocumentId::new(42), false).await.unwrap().is_none());

        let reopened = JsonDocumentRepository::new(&path);
        assert!(!reopened.snapshot().await.unwrap()[0].visible);
    }

    #[tokio::test]
    async fn test_legacy_wrapped_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"files": [{"id": 3, "class_level": "12", "subject_name": "Physics",
                "category": "Practical Exam", "year": "2022", "is_published": true,
                "custom_filename": "Physics practical", "filename": "phy.pdf"}]}"#,
        )
        .unwrap();

        let repo = JsonDocumentRepository::new(&path);
        let documents = repo.snapshot().await.unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].exam_type, "Practical Exam");

        let next = repo.insert(pending("Annual Exam")).await.unwrap();
        assert_eq!(next.id, DocumentId::new(4));
    }

    #[tokio::test]
    async fn test_unreadable_records_survive_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.json");
        // record 2 carries both the current and the legacy exam type key
        std::fs::write(
            &path,
            r#"[
                {"id": 1, "class_level": "9", "subject_id": "science", "exam_type": "Annual Exam",
                 "year": "2023", "title": "Annual", "file_ref": "a.pdf"},
                {"id": 2, "class_level": "9", "exam_type": "Unit Test 1", "category": "Unit Test 1"},
                {"id": 3, "class_level": "9", "subject_id": "science", "category": "Unit Test 3",
                 "year": "2023", "is_published": true, "custom_filename": "UT3", "filename": "ut3.pdf",
                 "notes": "scanned copy"}
            ]"#,
        )
        .unwrap();

        let repo = JsonDocumentRepository::new(&path);
        assert_eq!(repo.snapshot().await.unwrap().len(), 2);

        let inserted = repo.insert(pending("Unit Test 2")).await.unwrap();
        assert_eq!(inserted.id, DocumentId::new(4));

        let hidden = repo.set_visibility(DocumentId::new(3), false).await.unwrap().unwrap();
        assert!(!hidden.visible);
        assert!(repo.set_visibility(DocumentId::new(2), false).await.unwrap().is_none());

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = written.as_array().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[1],
            serde_json::json!({"id": 2, "class_level": "9", "exam_type": "Unit Test 1", "category": "Unit Test 1"})
        );
        assert_eq!(records[2]["is_published"], false);
        assert_eq!(records[2]["notes"], "scanned copy");
        assert!(records[2].get("visible").is_none());
        assert_eq!(records[3]["id"], 4);

        let ids: Vec<u64> = repo
            .snapshot()
            .await
            .unwrap()
            .iter()
            .map(|d| d.id.value())
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn test_legacy_wrapper_keeps_other_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(
            &path,
            r#"{"classes": {"9": {"name": "Class 9"}}, "files": [{"id": 7, "class_level": "9"}]}"#,
        )
        .unwrap();

        let repo = JsonDocumentRepository::new(&path);
        let inserted = repo.insert(pending("Annual Exam")).await.unwrap();
        assert_eq!(inserted.id, DocumentId::new(8));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["classes"]["9"]["name"], "Class 9");
        assert_eq!(written["files"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_non_list_file_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("files.json");
        std::fs::write(&path, "42").unwrap();

        let err = JsonDocumentRepository::new(&path).snapshot().await.unwrap_err();
        assert!(err.is_corrupt());
    }
}
