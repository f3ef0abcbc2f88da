//! OpenLibrary integration for book metadata lookups

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use reqwest::StatusCode;
use serde_json::Value;

use crate::{
    config::OpenLibraryConfig,
    error::{AppError, AppResult},
    isbn,
    models::{PublisherInput, RemoteBook},
};

const TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Clone)]
pub struct OpenLibraryService {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryService {
    pub fn new(config: OpenLibraryConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(TIMEOUT)
            .read_timeout(TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Look up book metadata by ISBN. The ISBN is validated and normalized
    /// first; 404 maps to `MetadataNotFound`, any other non-200 status and
    /// every transport or decoding failure maps to `ExternalService`.
    pub async fn find_by_isbn(&self, raw_isbn: &str) -> AppResult<RemoteBook> {
        let started = Instant::now();
        tracing::info!(isbn = raw_isbn, "OpenLibrary lookup started");

        let result = self.fetch(raw_isbn).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => tracing::info!(isbn = raw_isbn, elapsed_ms, "OpenLibrary lookup finished"),
            Err(e) => {
                tracing::warn!(isbn = raw_isbn, elapsed_ms, error = %e, "OpenLibrary lookup failed")
            }
        }

        result
    }

    // The response handle is consumed or dropped on every branch below,
    // returning the connection to the client's pool.
    async fn fetch(&self, raw_isbn: &str) -> AppResult<RemoteBook> {
        let isbn = isbn::validate(raw_isbn)?;
        let url = format!("{}{}.json", self.base_url, isbn);

        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to reach OpenLibrary: {}", e))
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(AppError::MetadataNotFound(
                    "ISBN not found on OpenLibrary".to_string(),
                ));
            }
            StatusCode::OK => {}
            status => {
                return Err(AppError::ExternalService(format!(
                    "OpenLibrary request failed with HTTP status {}",
                    status.as_u16()
                )));
            }
        }

        let json: Value = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Malformed OpenLibrary response: {}", e))
        })?;

        Ok(parse_remote_book(isbn, &json))
    }
}

/// Tolerant decoding of an OpenLibrary edition document: every field is
/// optional and malformed sub-fields degrade to empty/None.
fn parse_remote_book(isbn: String, json: &Value) -> RemoteBook {
    RemoteBook {
        isbn,
        title: json.get("title").and_then(Value::as_str).map(str::to_string),
        publishers: extract_publishers(json),
        publication_date: extract_publication_date(json),
    }
}

fn extract_publishers(json: &Value) -> Vec<PublisherInput> {
    json.get("publishers")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(|name| PublisherInput {
                    name: name.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// OpenLibrary publish dates are free text; only the `"Month D, YYYY"`
/// form is recognized, anything else becomes None.
fn extract_publication_date(json: &Value) -> Option<NaiveDate> {
    let raw = json.get("publish_date").and_then(Value::as_str)?.trim();
    NaiveDate::parse_from_str(raw, "%B %e, %Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_a_full_document() {
        let json = json!({
            "title": "The Design of Everyday Things",
            "publishers": ["Basic Books", 42, {"name": "ignored"}],
            "publish_date": "August 19, 2013"
        });

        let book = parse_remote_book("9780465050659".to_string(), &json);

        assert_eq!(book.isbn, "9780465050659");
        assert_eq!(book.title.as_deref(), Some("The Design of Everyday Things"));
        assert_eq!(book.publishers.len(), 1);
        assert_eq!(book.publishers[0].name, "Basic Books");
        assert_eq!(
            book.publication_date,
            NaiveDate::from_ymd_opt(2013, 8, 19)
        );
    }

    #[test]
    fn missing_fields_degrade_to_defaults() {
        let book = parse_remote_book("0306406152".to_string(), &json!({}));

        assert!(book.title.is_none());
        assert!(book.publishers.is_empty());
        assert!(book.publication_date.is_none());
    }

    #[test]
    fn null_publishers_map_to_an_empty_list() {
        let json = json!({ "publishers": null });
        assert!(parse_remote_book("0306406152".into(), &json)
            .publishers
            .is_empty());
    }

    #[test]
    fn unparseable_publish_date_maps_to_none() {
        for raw in ["2013", "19 August 2013", "August 2013", "soon"] {
            let json = json!({ "publish_date": raw });
            let book = parse_remote_book("0306406152".into(), &json);
            assert!(book.publication_date.is_none(), "{:?} should not parse", raw);
        }
    }

    #[test]
    fn single_digit_days_parse() {
        let json = json!({ "publish_date": "March 4, 2008" });
        let book = parse_remote_book("0306406152".into(), &json);
        assert_eq!(book.publication_date, NaiveDate::from_ymd_opt(2008, 3, 4));
    }
}
