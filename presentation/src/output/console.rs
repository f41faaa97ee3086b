//! Console output formatter for catalog results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use exam_catalog_application::{BrowseOutput, SubjectMenu};
use exam_catalog_domain::{ClassLevel, Document, Taxonomy};

/// Formats catalog results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        format!("{}\n{}\n", title.cyan().bold(), "─".repeat(title.chars().count()))
    }

    fn document_line(document: &Document) -> String {
        let mut line = format!(
            "  {:>4}  {}  {}",
            format!("#{}", document.id).dimmed(),
            document.metadata.title.bold(),
            format!("[{} {}]", document.exam_type, document.year).yellow()
        );
        if !document.visible {
            line.push_str(&format!("  {}", "(hidden)".red()));
        }
        line
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn classes(&self, taxonomy: &Taxonomy) -> String {
        let mut output = Self::header("Classes");
        for class in taxonomy.classes() {
            output.push_str(&format!(
                "  {:<6} {:<20} {} subjects\n",
                class.id.as_str().green().bold(),
                class.name,
                class.subjects().len()
            ));
        }
        output
    }

    fn subjects(&self, class: &ClassLevel) -> String {
        let mut output = Self::header(&format!("{} subjects", class.name));
        for subject in class.subjects() {
            let kind = if subject.has_practical() {
                "theory + practical".green()
            } else {
                "theory".normal()
            };
            output.push_str(&format!(
                "  {:<12} {:<24} {}\n",
                subject.id.as_str().bold(),
                subject.name,
                kind
            ));
        }
        output
    }

    fn menu(&self, menu: &SubjectMenu) -> String {
        let mut output = Self::header(&format!(
            "Class {} › {}",
            menu.class_id, menu.subject.name
        ));
        if menu.counts.is_empty() {
            output.push_str(&format!("  {}\n", "No papers uploaded yet.".dimmed()));
        }
        for category in menu.counts.categories() {
            output.push_str(&format!(
                "\n{} {}\n",
                category.category.bold(),
                format!("({})", category.total).dimmed()
            ));
            for entry in &category.types {
                let count = if entry.count > 0 {
                    entry.count.to_string().green().bold()
                } else {
                    entry.count.to_string().dimmed()
                };
                output.push_str(&format!(
                    "  {:<20} {:>3}  {}\n",
                    entry.exam_type,
                    count,
                    entry.slug.dimmed()
                ));
            }
        }
        output
    }

    fn listing(&self, listing: &BrowseOutput) -> String {
        let title = match &listing.exam_display_name {
            Some(exam) => format!(
                "Class {} › {} › {}",
                listing.class_id, listing.subject_name, exam
            ),
            None => format!("Class {} › {}", listing.class_id, listing.subject_name),
        };

        let mut output = Self::header(&title);
        if listing.documents.is_empty() {
            output.push_str(&format!("  {}\n", "No papers found.".dimmed()));
            return output;
        }
        for document in &listing.documents {
            output.push_str(&Self::document_line(document));
            output.push('\n');
        }
        output.push_str(&format!(
            "\n{} paper(s)\n",
            listing.documents.len().to_string().bold()
        ));
        output
    }

    fn document(&self, document: &Document) -> String {
        let mut output = Self::header(&document.metadata.title);
        let subject = document
            .subject_name
            .as_deref()
            .or(document.subject_id.as_ref().map(|id| id.as_str()))
            .unwrap_or("-");

        let mut field = |label: &str, value: &str| {
            output.push_str(&format!("  {:<12} {}\n", format!("{label}:").cyan(), value));
        };
        field("Id", &document.id.to_string());
        field("Class", document.class_level.as_str());
        field("Subject", subject);
        field("Exam", &document.exam_type);
        field("Year", &document.year);
        field("File", &document.metadata.file_ref);
        if let Some(size) = &document.metadata.size {
            field("Size", size);
        }
        if let Some(uploaded_at) = document.uploaded_at {
            field("Uploaded", &uploaded_at.format("%Y-%m-%d %H:%M UTC").to_string());
        }
        field(
            "Votes",
            &format!(
                "{} up / {} down",
                document.engagement.likes, document.engagement.dislikes
            ),
        );
        field("Visible", if document.visible { "yes" } else { "no" });

        if let Some(description) = &document.metadata.description {
            output.push_str(&format!("\n{}\n", description));
        }
        output
    }

    fn exam_types(&self, exam_types: &[&str]) -> String {
        let mut output = Self::header("Exam types");
        for exam_type in exam_types {
            output.push_str(&format!("  {}\n", exam_type));
        }
        output
    }
}
