//! Import report models for the CSV bulk-import pipeline

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::book::BookView;

/// Aggregate result of one CSV import call: every successfully persisted
/// book plus one entry per failed line. Per-line failures never abort the
/// import.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ImportReport {
    pub books: Vec<BookView>,
    pub errors: Vec<ImportError>,
}

/// A single line that failed to parse or persist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportError {
    /// 1-based line number in the uploaded file
    pub line: u32,
    /// Raw line content, verbatim
    pub content: String,
    pub message: String,
}

impl ImportReport {
    pub fn add_error(&mut self, line: u32, content: &str, message: impl Into<String>) {
        self.errors.push(ImportError {
            line,
            content: content.to_string(),
            message: message.into(),
        });
    }
}
