//! On-disk record shapes for the JSON data files.
//!
//! The records are lenient: missing keys fall back to defaults, subjects
//! may be stored as a list of records or as the legacy `{id: name}` map,
//! and document records accept the legacy field names (`category`,
//! `is_published`, `custom_filename`, `filename`, `upload_date`). The
//! taxonomy is written back in the current shape. Document records are
//! kept as raw JSON so that records this version cannot decode survive
//! every rewrite of the file.

use chrono::{DateTime, NaiveDateTime, Utc};
use exam_catalog_domain::{
    ClassId, ClassLevel, Document, DocumentId, DocumentMetadata, Engagement, ExamCategory,
    Subject, SubjectId, Taxonomy, next_document_id,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

// ==================== Taxonomy ====================

/// Stored form of the taxonomy file.
///
/// Each key decodes on its own: a null or malformed key reads as its
/// default, and a malformed class, subject or category entry is skipped.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredTaxonomy {
    #[serde(default, deserialize_with = "lenient_classes")]
    pub classes: BTreeMap<String, StoredClass>,
    #[serde(default, deserialize_with = "lenient_categories")]
    pub exam_categories: Vec<ExamCategory>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredClass {
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_subjects")]
    pub subjects: StoredSubjects,
}

/// Subjects of a class, in either stored layout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StoredSubjects {
    List(Vec<StoredSubject>),
    /// Legacy `{"maths": "Mathematics"}` layout, in file order.
    Map(OrderedEntries<StoredSubjectValue>),
}

impl Default for StoredSubjects {
    fn default() -> Self {
        StoredSubjects::List(Vec::new())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSubject {
    pub id: SubjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theory_only: Option<bool>,
}

/// Value side of a legacy subject map entry.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredSubjectValue {
    Name(String),
    Record {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        theory_only: Option<bool>,
    },
}

/// Decode a value, or fall back to the default when it is null or has
/// the wrong shape.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed taxonomy value: {}", e);
        T::default()
    }))
}

/// Decode one entry of a collection, logging and dropping it on failure.
fn decode_entry<T: DeserializeOwned>(what: &str, key: &dyn fmt::Display, value: Value) -> Option<T> {
    serde_json::from_value(value)
        .map_err(|e| warn!("Skipping malformed {} {}: {}", what, key, e))
        .ok()
}

fn lenient_classes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, StoredClass>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(BTreeMap::new()),
        other => {
            warn!("Ignoring malformed classes value: {}", other);
            return Ok(BTreeMap::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|(id, value)| {
            let class = decode_entry("class", &id, value)?;
            Some((id, class))
        })
        .collect())
}

fn lenient_categories<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<ExamCategory>, D::Error> {
    let records = match Value::deserialize(deserializer)? {
        Value::Array(records) => records,
        Value::Null => return Ok(Vec::new()),
        other => {
            warn!("Ignoring malformed exam_categories value: {}", other);
            return Ok(Vec::new());
        }
    };
    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| decode_entry("exam category", &format!("#{index}"), value))
        .collect())
}

fn lenient_subjects<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StoredSubjects, D::Error> {
    let subjects = match Value::deserialize(deserializer)? {
        Value::Array(records) => StoredSubjects::List(
            records
                .into_iter()
                .enumerate()
                .filter_map(|(index, value)| decode_entry("subject", &format!("#{index}"), value))
                .collect(),
        ),
        Value::Object(entries) => StoredSubjects::Map(OrderedEntries(
            entries
                .into_iter()
                .filter_map(|(id, value)| {
                    let value = decode_entry("subject", &id, value)?;
                    Some((id, value))
                })
                .collect(),
        )),
        Value::Null => StoredSubjects::default(),
        other => {
            warn!("Ignoring malformed subjects value: {}", other);
            StoredSubjects::default()
        }
    };
    Ok(subjects)
}

fn build_subject(id: SubjectId, name: Option<String>, theory_only: Option<bool>) -> Subject {
    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| id.as_str().to_string());
    let subject = Subject::new(id, name);
    match theory_only {
        Some(flag) => subject.with_theory_only(flag),
        None => subject,
    }
}

impl StoredSubjects {
    fn into_subjects(self) -> Vec<Subject> {
        match self {
            StoredSubjects::List(list) => list
                .into_iter()
                .map(|s| build_subject(s.id, s.name, s.theory_only))
                .collect(),
            StoredSubjects::Map(entries) => entries
                .0
                .into_iter()
                .map(|(id, value)| {
                    let id = SubjectId::new(id);
                    match value {
                        StoredSubjectValue::Name(name) => build_subject(id, Some(name), None),
                        StoredSubjectValue::Record { name, theory_only } => {
                            build_subject(id, name, theory_only)
                        }
                    }
                })
                .collect(),
        }
    }
}

impl From<StoredTaxonomy> for Taxonomy {
    fn from(stored: StoredTaxonomy) -> Self {
        let classes = stored.classes.into_iter().map(|(id, class)| {
            let subjects = class.subjects.into_subjects();
            ClassLevel::from_parts(ClassId::new(id), class.name, subjects)
        });
        Taxonomy::new(classes, stored.exam_categories)
    }
}

impl From<&Taxonomy> for StoredTaxonomy {
    fn from(taxonomy: &Taxonomy) -> Self {
        let classes = taxonomy
            .classes()
            .map(|class| {
                let subjects = class
                    .subjects()
                    .iter()
                    .map(|s| StoredSubject {
                        id: s.id.clone(),
                        name: Some(s.name.clone()),
                        theory_only: Some(s.theory_only),
                    })
                    .collect();
                (
                    class.id.as_str().to_string(),
                    StoredClass {
                        name: Some(class.name.clone()),
                        subjects: StoredSubjects::List(subjects),
                    },
                )
            })
            .collect();

        Self {
            classes,
            exam_categories: taxonomy.stored_exam_categories().to_vec(),
        }
    }
}

/// Map entries in the order they appear in the file.
#[derive(Debug)]
pub struct OrderedEntries<V>(pub Vec<(String, V)>);

impl<V: Serialize> Serialize for OrderedEntries<V> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

// ==================== Documents ====================

/// Stored form of the documents file: a bare list, or the legacy
/// `{"files": [...]}` wrapper whose other keys are kept as they are.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredDocumentFile {
    List(Vec<Value>),
    Wrapped {
        #[serde(default)]
        files: Vec<Value>,
        #[serde(flatten)]
        rest: serde_json::Map<String, Value>,
    },
}

impl Default for StoredDocumentFile {
    fn default() -> Self {
        StoredDocumentFile::List(Vec::new())
    }
}

impl StoredDocumentFile {
    pub fn records(&self) -> &[Value] {
        match self {
            StoredDocumentFile::List(records) | StoredDocumentFile::Wrapped { files: records, .. } => {
                records
            }
        }
    }

    pub fn records_mut(&mut self) -> &mut Vec<Value> {
        match self {
            StoredDocumentFile::List(records) | StoredDocumentFile::Wrapped { files: records, .. } => {
                records
            }
        }
    }

    /// The decodable documents, in file order.
    pub fn documents(&self) -> Vec<Document> {
        decode_documents(self.records())
    }

    /// Next free id, counting the ids of undecodable records too.
    pub fn next_id(&self) -> Option<DocumentId> {
        next_document_id(self.records().iter().filter_map(record_id))
    }

    /// Index and decoded form of the first readable record with this id.
    pub fn find(&self, id: DocumentId) -> Option<(usize, Document)> {
        self.records()
            .iter()
            .enumerate()
            .filter(|(_, record)| record_id(record) == Some(id))
            .find_map(|(index, record)| Some((index, decode_document(record).ok()?)))
    }
}

/// The `id` of a raw record, whether or not the rest of it decodes.
pub fn record_id(record: &Value) -> Option<DocumentId> {
    match record.get("id")? {
        Value::Number(n) => n.as_u64().map(DocumentId::new),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Set the visibility flag of a raw record in place, under whichever
/// name the record already uses.
pub fn set_record_visibility(record: &mut Value, visible: bool) {
    if let Value::Object(fields) = record {
        let key = if fields.contains_key("is_published") && !fields.contains_key("visible") {
            "is_published"
        } else {
            "visible"
        };
        fields.insert(key.to_string(), Value::Bool(visible));
    }
}

/// One stored document record.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: DocumentId,
    pub class_level: ClassId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<SubjectId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject_name: Option<String>,
    #[serde(alias = "category", default)]
    pub exam_type: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(alias = "is_published", default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub dislikes: u32,
    #[serde(alias = "custom_filename", default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "filename", default)]
    pub file_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(alias = "upload_date", default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,
}

fn default_visible() -> bool {
    true
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// Parse an upload timestamp: RFC 3339, or a naive ISO timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc()))
        .ok()
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        let uploaded_at = stored.uploaded_at.as_deref().and_then(|raw| {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                warn!(id = %stored.id, "Ignoring unparseable upload timestamp {:?}", raw);
            }
            parsed
        });

        Document {
            id: stored.id,
            class_level: stored.class_level,
            subject_id: stored.subject_id,
            subject_name: stored.subject_name,
            exam_type: stored.exam_type,
            year: stored.year,
            visible: stored.visible,
            engagement: Engagement {
                likes: stored.likes,
                dislikes: stored.dislikes,
            },
            metadata: DocumentMetadata {
                title: stored.title,
                description: stored.description,
                file_ref: stored.file_ref,
                size: stored.size,
            },
            uploaded_at,
        }
    }
}

impl From<&Document> for StoredDocument {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id,
            class_level: document.class_level.clone(),
            subject_id: document.subject_id.clone(),
            subject_name: document.subject_name.clone(),
            exam_type: document.exam_type.clone(),
            year: document.year.clone(),
            visible: document.visible,
            likes: document.engagement.likes,
            dislikes: document.engagement.dislikes,
            title: document.metadata.title.clone(),
            description: document.metadata.description.clone(),
            file_ref: document.metadata.file_ref.clone(),
            size: document.metadata.size.clone(),
            uploaded_at: document.uploaded_at.map(|at| at.to_rfc3339()),
        }
    }
}

pub fn decode_document(record: &Value) -> Result<Document, serde_json::Error> {
    StoredDocument::deserialize(record).map(Document::from)
}

/// Decode document records, skipping the ones that cannot be read.
pub fn decode_documents(records: &[Value]) -> Vec<Document> {
    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match decode_document(record) {
            Ok(document) => Some(document),
            Err(e) => {
                warn!("Skipping unreadable document record #{}: {}", index, e);
                None
            }
        })
        .collect()
}
