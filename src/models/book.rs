//! Book model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::author::{Author, AuthorInput, AuthorView};
use super::publisher::{Publisher, PublisherInput, PublisherView};

/// Full book model (DB row plus separately loaded relations)
#[derive(Debug, Clone, FromRow)]
pub struct Book {
    pub id: Option<i64>,
    pub isbn: String,
    pub title: String,
    pub publication_date: Option<NaiveDate>,
    pub registration_date: Option<DateTime<Utc>>,
    #[sqlx(skip)]
    pub authors: Vec<Author>,
    #[sqlx(skip)]
    pub publishers: Vec<Publisher>,
}

impl Book {
    /// Seed a new record from an ISBN. Everything else is filled in by the
    /// catalog service before persistence.
    pub fn with_isbn(isbn: &str) -> Self {
        Self {
            id: None,
            isbn: isbn.to_string(),
            title: String::new(),
            publication_date: None,
            registration_date: None,
            authors: Vec::new(),
            publishers: Vec::new(),
        }
    }
}

/// Flattened book representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BookView {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub authors: Vec<AuthorView>,
    pub publishers: Vec<PublisherView>,
    pub publication_date: Option<NaiveDate>,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.unwrap_or_default(),
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            authors: book.authors.iter().map(AuthorView::from).collect(),
            publishers: book.publishers.iter().map(PublisherView::from).collect(),
            publication_date: book.publication_date,
        }
    }
}

/// Create/update request body
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookInput {
    pub isbn: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<AuthorInput>,
    #[serde(default)]
    pub publishers: Vec<PublisherInput>,
    pub publication_date: Option<NaiveDate>,
}

/// Search query parameters; every filter is optional and they combine
/// with AND. The publication date stays a raw string here and is parsed
/// by the catalog service.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    pub id: Option<i64>,
    pub isbn: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    #[serde(rename = "publicationDate")]
    pub publication_date: Option<String>,
}

/// Book metadata as returned by the OpenLibrary lookup; not persisted
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RemoteBook {
    pub isbn: String,
    pub title: Option<String>,
    pub publishers: Vec<PublisherInput>,
    pub publication_date: Option<NaiveDate>,
}
