//! Taxonomy entities: class levels, subjects and exam categories.

use crate::core::error::DomainError;
use crate::core::identifier::{ClassId, SubjectId};
use crate::taxonomy::ordering::{self, PRACTICAL_CATEGORY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display names of subjects that have a practical-exam component.
///
/// Used only to derive [`Subject::theory_only`] when a subject is created
/// without an explicit flag. Matching is case-insensitive.
pub const PRACTICAL_SUBJECT_NAMES: &[&str] = &[
    "Science",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "Computer Applications",
];

/// Check whether a subject display name belongs to the practical-capable set.
pub fn is_practical_capable(name: &str) -> bool {
    let name = name.trim();
    PRACTICAL_SUBJECT_NAMES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(name))
}

/// A curriculum subject within one class level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    /// Subjects without a practical exam never list the "Practical Exam" category.
    pub theory_only: bool,
}

impl Subject {
    /// Create a subject, deriving `theory_only` from its display name.
    pub fn new(id: impl Into<SubjectId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            theory_only: !is_practical_capable(&name),
            name,
        }
    }

    /// Override the derived classification.
    pub fn with_theory_only(mut self, theory_only: bool) -> Self {
        self.theory_only = theory_only;
        self
    }

    pub fn has_practical(&self) -> bool {
        !self.theory_only
    }
}

/// A school grade with its subjects in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassLevel {
    pub id: ClassId,
    pub name: String,
    subjects: Vec<Subject>,
}

impl ClassLevel {
    /// Create an empty class named "Class {id}".
    pub fn new(id: impl Into<ClassId>) -> Self {
        let id = id.into();
        Self {
            name: format!("Class {}", id),
            id,
            subjects: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Build a class from stored parts. Later duplicates of a subject id are dropped.
    pub fn from_parts(id: ClassId, name: Option<String>, subjects: Vec<Subject>) -> Self {
        let mut class = match name {
            Some(name) if !name.trim().is_empty() => Self::new(id).with_name(name),
            _ => Self::new(id),
        };
        for subject in subjects {
            class.insert_missing_subject(subject);
        }
        class
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: &SubjectId) -> Option<&Subject> {
        self.subjects.iter().find(|s| &s.id == id)
    }

    pub fn contains_subject(&self, id: &SubjectId) -> bool {
        self.subject(id).is_some()
    }

    /// Append a subject, rejecting an id already used in this class.
    pub fn add_subject(&mut self, subject: Subject) -> Result<(), DomainError> {
        if self.contains_subject(&subject.id) {
            return Err(DomainError::DuplicateSubject {
                class: self.id.clone(),
                subject: subject.id,
            });
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Append a subject unless its id is already present. Returns whether it was added.
    pub fn insert_missing_subject(&mut self, subject: Subject) -> bool {
        if self.contains_subject(&subject.id) {
            return false;
        }
        self.subjects.push(subject);
        true
    }
}

/// A grouping of related exam types ("Unit Tests" -> "Unit Test 1".."Unit Test 5").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCategory {
    pub name: String,
    /// Exam type display names, in display order.
    #[serde(default)]
    pub types: Vec<String>,
    /// Explicit menu priority; falls back to the canonical order when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl ExamCategory {
    pub fn new<I, S>(name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            types: types.into_iter().map(Into::into).collect(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Menu priority; `None` sorts after every prioritized category.
    pub fn sort_priority(&self) -> Option<u32> {
        self.priority
            .or_else(|| ordering::canonical_priority(&self.name))
    }

    pub fn is_practical(&self) -> bool {
        self.name.trim().eq_ignore_ascii_case(PRACTICAL_CATEGORY)
    }

    /// Whether this category applies to a subject.
    pub fn applies_to(&self, subject: &Subject) -> bool {
        !self.is_practical() || subject.has_practical()
    }
}

/// The full hierarchy: classes -> subjects, plus the exam categories.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Taxonomy {
    classes: BTreeMap<ClassId, ClassLevel>,
    exam_categories: Vec<ExamCategory>,
}

impl Taxonomy {
    pub fn new(
        classes: impl IntoIterator<Item = ClassLevel>,
        exam_categories: Vec<ExamCategory>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for class in classes {
            map.entry(class.id.clone()).or_insert(class);
        }
        Self {
            classes: map,
            exam_categories,
        }
    }

    /// Classes in grade order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassLevel> {
        self.classes.values()
    }

    pub fn class(&self, id: &ClassId) -> Option<&ClassLevel> {
        self.classes.get(id)
    }

    pub(crate) fn class_mut(&mut self, id: &ClassId) -> Option<&mut ClassLevel> {
        self.classes.get_mut(id)
    }

    pub(crate) fn insert_class(&mut self, class: ClassLevel) {
        self.classes.insert(class.id.clone(), class);
    }

    /// Look up a subject, reporting which level of the path is missing.
    pub fn subject(&self, class: &ClassId, subject: &SubjectId) -> Result<&Subject, DomainError> {
        let level = self
            .class(class)
            .ok_or_else(|| DomainError::ClassNotFound(class.clone()))?;
        level
            .subject(subject)
            .ok_or_else(|| DomainError::SubjectNotFound {
                class: class.clone(),
                subject: subject.clone(),
            })
    }

    /// Add a subject to an existing class.
    pub fn add_subject(&mut self, class: &ClassId, subject: Subject) -> Result<(), DomainError> {
        let level = self
            .class_mut(class)
            .ok_or_else(|| DomainError::ClassNotFound(class.clone()))?;
        level.add_subject(subject)
    }

    /// Categories exactly as stored.
    pub fn stored_exam_categories(&self) -> &[ExamCategory] {
        &self.exam_categories
    }

    pub(crate) fn set_exam_categories(&mut self, categories: Vec<ExamCategory>) {
        self.exam_categories = categories;
    }

    /// Categories in menu order.
    pub fn exam_categories(&self) -> Vec<&ExamCategory> {
        ordering::sorted_by_priority(&self.exam_categories)
    }

    /// Categories in menu order, without those that do not apply to `subject`.
    pub fn categories_for_subject(&self, subject: &Subject) -> Vec<&ExamCategory> {
        self.exam_categories()
            .into_iter()
            .filter(|category| category.applies_to(subject))
            .collect()
    }

    /// Every exam type across all categories, in menu order.
    ///
    /// This is the option list offered when registering a document.
    pub fn exam_type_options(&self) -> Vec<&str> {
        self.exam_categories()
            .into_iter()
            .flat_map(|category| category.types.iter().map(String::as_str))
            .collect()
    }
}
