//! JSON output

use crate::output::formatter::OutputFormatter;
use exam_catalog_application::{BrowseOutput, SubjectMenu};
use exam_catalog_domain::{ClassLevel, Document, Taxonomy};
use serde::Serialize;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

impl OutputFormatter for JsonFormatter {
    fn classes(&self, taxonomy: &Taxonomy) -> String {
        let classes: Vec<&ClassLevel> = taxonomy.classes().collect();
        to_json(&classes)
    }

    fn subjects(&self, class: &ClassLevel) -> String {
        to_json(class)
    }

    fn menu(&self, menu: &SubjectMenu) -> String {
        to_json(menu)
    }

    fn listing(&self, listing: &BrowseOutput) -> String {
        to_json(listing)
    }

    fn document(&self, document: &Document) -> String {
        to_json(document)
    }

    fn exam_types(&self, exam_types: &[&str]) -> String {
        to_json(exam_types)
    }
}
