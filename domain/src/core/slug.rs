//! Slug helpers for exam labels.
//!
//! A slug is the lower-cased, hyphenated form of an exam label
//! ("Unit Test 1" -> "unit-test-1"). Navigation paths carry slugs and
//! document records carry free-text labels; both sides go through
//! [`slugify`] before they are compared.

/// Lower-case a label and replace spaces with hyphens.
pub fn slugify(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

/// Turn a slug back into a heading ("half-yearly-exam" -> "Half Yearly Exam").
pub fn display_name_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
