//! Output formatter trait

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::output::json::JsonFormatter;
use exam_catalog_application::{BrowseOutput, SubjectMenu};
use exam_catalog_domain::{ClassLevel, Document, Taxonomy};

/// Trait for rendering catalog results
pub trait OutputFormatter {
    /// Classes with their subject counts
    fn classes(&self, taxonomy: &Taxonomy) -> String;

    /// Subjects of one class
    fn subjects(&self, class: &ClassLevel) -> String;

    /// A subject's exam menu with count badges
    fn menu(&self, menu: &SubjectMenu) -> String;

    /// A resolved document listing
    fn listing(&self, listing: &BrowseOutput) -> String;

    /// A single document
    fn document(&self, document: &Document) -> String;

    /// Flattened exam type options
    fn exam_types(&self, exam_types: &[&str]) -> String;
}

/// Pick the formatter for an output format.
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Table => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    }
}
