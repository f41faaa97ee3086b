//! Output formatting (console tables and JSON)

pub mod console;
pub mod formatter;
pub mod json;
