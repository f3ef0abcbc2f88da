//! Book catalog service

use chrono::NaiveDate;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookInput, BookQuery, BookView},
    repository::{books::BookFilters, Repository},
};

use super::relations::RelationshipResolver;

#[derive(Clone)]
pub struct BookCatalogService {
    repository: Repository,
    relations: RelationshipResolver,
}

impl BookCatalogService {
    pub fn new(repository: Repository) -> Self {
        Self {
            relations: RelationshipResolver::new(repository.clone()),
            repository,
        }
    }

    /// Get a book by ID with authors and publishers loaded
    pub async fn find_by_id(&self, id: i64) -> AppResult<BookView> {
        let mut book = self
            .repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        self.load_relations(&mut book).await?;
        Ok(BookView::from(&book))
    }

    /// Create a book, or update the record already holding the same ISBN.
    /// Title and publication date are always overwritten; author and
    /// publisher references go through get-or-create resolution.
    pub async fn create_or_update(&self, input: &BookInput) -> AppResult<BookView> {
        let isbn = input.isbn.as_deref().unwrap_or("").trim();
        let title = input.title.as_deref().unwrap_or("").trim();

        if isbn.is_empty() || title.is_empty() {
            return Err(AppError::BadRequest(
                "ISBN and title are required".to_string(),
            ));
        }

        let mut book = match self.repository.books.find_by_isbn(isbn).await? {
            Some(mut existing) => {
                self.load_relations(&mut existing).await?;
                existing
            }
            None => Book::with_isbn(isbn),
        };

        book.title = title.to_string();
        book.publication_date = input.publication_date;

        self.relations
            .resolve_authors(&input.authors, &mut book)
            .await?;
        self.relations
            .resolve_publishers(&input.publishers, &mut book)
            .await?;

        let book = match book.id {
            None => {
                let created = self.repository.books.create(&book).await?;
                Book {
                    authors: book.authors,
                    publishers: book.publishers,
                    ..created
                }
            }
            Some(id) => {
                self.repository.books.update(id, &book).await?;
                book
            }
        };

        self.store_relations(&book).await?;

        Ok(BookView::from(&book))
    }

    /// Delete a book, clearing its association edges before the row goes
    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        if self.repository.books.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }

        self.repository.books.clear_relations(id).await?;
        self.repository.books.delete(id).await
    }

    /// Filtered search; every filter is optional and they combine with
    /// AND. No filters returns the whole catalog; an empty result set is
    /// reported as not found.
    pub async fn find_by_parameters(&self, query: &BookQuery) -> AppResult<Vec<BookView>> {
        let publication_date = parse_publication_date(query.publication_date.as_deref())?;

        let filters = BookFilters {
            id: query.id,
            isbn: trimmed(query.isbn.as_deref()),
            title: trimmed(query.title.as_deref()),
            author: trimmed(query.author.as_deref()),
            publisher: trimmed(query.publisher.as_deref()),
            publication_date,
        };

        let mut books = self.repository.books.search(&filters).await?;

        if books.is_empty() {
            return Err(AppError::NotFound(
                "No books match the given parameters".to_string(),
            ));
        }

        let mut views = Vec::with_capacity(books.len());
        for book in &mut books {
            self.load_relations(book).await?;
            views.push(BookView::from(&*book));
        }
        Ok(views)
    }

    async fn load_relations(&self, book: &mut Book) -> AppResult<()> {
        if let Some(id) = book.id {
            book.authors = self.repository.authors.list_for_book(id).await?;
            book.publishers = self.repository.publishers.list_for_book(id).await?;
        }
        Ok(())
    }

    async fn store_relations(&self, book: &Book) -> AppResult<()> {
        let Some(id) = book.id else {
            return Ok(());
        };

        for author in &book.authors {
            self.repository.books.attach_author(id, author.id).await?;
        }
        for publisher in &book.publishers {
            self.repository
                .books
                .attach_publisher(id, publisher.id)
                .await?;
        }
        Ok(())
    }
}

fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_publication_date(value: Option<&str>) -> AppResult<Option<NaiveDate>> {
    let Some(raw) = trimmed(value) else {
        return Ok(None);
    };

    raw.parse::<NaiveDate>()
        .map(Some)
        .map_err(|_| AppError::BadRequest(format!("Invalid publication date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_are_dropped() {
        assert_eq!(trimmed(None), None);
        assert_eq!(trimmed(Some("")), None);
        assert_eq!(trimmed(Some("   ")), None);
        assert_eq!(trimmed(Some(" rust ")), Some("rust"));
    }

    #[test]
    fn parses_iso_publication_date() {
        let date = parse_publication_date(Some("2012-06-27")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2012, 6, 27));
    }

    #[test]
    fn missing_publication_date_is_no_filter() {
        assert_eq!(parse_publication_date(None).unwrap(), None);
        assert_eq!(parse_publication_date(Some(" ")).unwrap(), None);
    }

    #[test]
    fn malformed_publication_date_is_rejected() {
        assert!(matches!(
            parse_publication_date(Some("27/06/2012")),
            Err(AppError::BadRequest(_))
        ));
    }
}
