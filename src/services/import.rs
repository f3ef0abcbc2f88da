//! CSV bulk-import pipeline for book records
//!
//! Expected file format, one record per line:
//!
//! ```text
//! isbn;title;author1,author2;publisher1,publisher2;yyyy-MM-dd
//! ```

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{AuthorInput, BookInput, ImportReport, PublisherInput},
};

use super::books::BookCatalogService;

/// Number of semicolon-separated columns a line must carry
const MIN_COLUMNS: usize = 5;

#[derive(Clone)]
pub struct CsvImportService {
    books: BookCatalogService,
}

impl CsvImportService {
    pub fn new(books: BookCatalogService) -> Self {
        Self { books }
    }

    /// Run the whole import: file shape checks, then line-by-line parsing
    /// and persistence. Per-line failures become report entries; only a
    /// rejected file aborts the call.
    pub async fn import(&self, file_name: Option<&str>, data: &[u8]) -> AppResult<ImportReport> {
        validate_csv_file(file_name)?;

        if data.is_empty() {
            return Err(AppError::FileImport(
                "The uploaded file is empty".to_string(),
            ));
        }

        let content = String::from_utf8_lossy(data);
        let mut report = ImportReport::default();

        for (index, line) in content.lines().enumerate() {
            let line_number = (index + 1) as u32;

            if line.trim().is_empty() {
                report.add_error(
                    line_number,
                    line,
                    format!("Line {} is empty and contains no information", line_number),
                );
                continue;
            }

            let input = match parse_line(line) {
                Ok(input) => input,
                Err(e) => {
                    report.add_error(line_number, line, e.to_string());
                    continue;
                }
            };

            match self.books.create_or_update(&input).await {
                Ok(view) => report.books.push(view),
                Err(e) => report.add_error(line_number, line, e.to_string()),
            }
        }

        tracing::info!(
            imported = report.books.len(),
            failed = report.errors.len(),
            "CSV import finished"
        );

        Ok(report)
    }
}

/// The multipart field must carry a file name ending in `.csv`.
fn validate_csv_file(file_name: Option<&str>) -> AppResult<()> {
    match file_name {
        None => Err(AppError::FileImport("No file was provided".to_string())),
        Some(name) if !name.to_lowercase().ends_with(".csv") => Err(AppError::FileImport(
            "The uploaded file is not a CSV".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

fn parse_line(line: &str) -> AppResult<BookInput> {
    let columns: Vec<&str> = line.split(';').collect();

    if columns.len() < MIN_COLUMNS {
        return Err(AppError::BadRequest("Invalid line layout".to_string()));
    }

    Ok(BookInput {
        isbn: Some(columns[0].trim().to_string()),
        title: Some(columns[1].trim().to_string()),
        authors: parse_names(columns[2])
            .into_iter()
            .map(|name| AuthorInput { name })
            .collect(),
        publishers: parse_names(columns[3])
            .into_iter()
            .map(|name| PublisherInput { name })
            .collect(),
        publication_date: parse_date(columns[4])?,
    })
}

fn parse_names(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_date(value: &str) -> AppResult<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid publication date: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_line() {
        let input =
            parse_line("9780306406157;High Energy Hadron Physics;M. Perl, L. Wolf;Wiley;1974-05-01")
                .unwrap();

        assert_eq!(input.isbn.as_deref(), Some("9780306406157"));
        assert_eq!(input.title.as_deref(), Some("High Energy Hadron Physics"));
        assert_eq!(input.authors.len(), 2);
        assert_eq!(input.authors[1].name, "L. Wolf");
        assert_eq!(input.publishers.len(), 1);
        assert_eq!(input.publishers[0].name, "Wiley");
        assert_eq!(
            input.publication_date,
            NaiveDate::from_ymd_opt(1974, 5, 1)
        );
    }

    #[test]
    fn rejects_a_line_with_too_few_columns() {
        assert!(matches!(
            parse_line("isbn;title;authors"),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn empty_date_column_maps_to_none() {
        let input = parse_line("0306406152;Title;Author;Publisher;").unwrap();
        assert_eq!(input.publication_date, None);
    }

    #[test]
    fn malformed_date_fails_the_line() {
        assert!(parse_line("0306406152;Title;Author;Publisher;01/05/1974").is_err());
    }

    #[test]
    fn blank_name_segments_are_dropped() {
        let input = parse_line("0306406152;Title;a,,b;;2000-01-01").unwrap();
        assert_eq!(input.authors.len(), 2);
        assert!(input.publishers.is_empty());
    }

    #[test]
    fn requires_a_csv_file_name() {
        assert!(validate_csv_file(None).is_err());
        assert!(validate_csv_file(Some("books.txt")).is_err());
        assert!(validate_csv_file(Some("books.CSV")).is_ok());
    }
}
