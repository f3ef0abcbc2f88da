//! Books repository for database operations
//!
//! Only bare book rows are handled here; author/publisher relations are
//! loaded and stored through the junction-table helpers and the dedicated
//! repositories.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres, QueryBuilder};

use crate::{error::AppResult, models::Book};

/// Search filters resolved by the catalog service; the publication date is
/// already parsed at this point.
#[derive(Debug, Default)]
pub struct BookFilters<'a> {
    pub id: Option<i64>,
    pub isbn: Option<&'a str>,
    pub title: Option<&'a str>,
    pub author: Option<&'a str>,
    pub publisher: Option<&'a str>,
    pub publication_date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get the bare book row by ID
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, isbn, title, publication_date, registration_date FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Get the bare book row by its unique ISBN
    pub async fn find_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, isbn, title, publication_date, registration_date FROM books WHERE isbn = $1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    /// Insert a new book; the registration timestamp is set here, once.
    pub async fn create(&self, book: &Book) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (isbn, title, publication_date, registration_date)
            VALUES ($1, $2, $3, now())
            RETURNING id, isbn, title, publication_date, registration_date
            "#,
        )
        .bind(&book.isbn)
        .bind(&book.title)
        .bind(book.publication_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update title and publication date. ISBN and registration date are
    /// immutable once persisted.
    pub async fn update(&self, id: i64, book: &Book) -> AppResult<()> {
        sqlx::query("UPDATE books SET title = $1, publication_date = $2 WHERE id = $3")
            .bind(&book.title)
            .bind(book.publication_date)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Delete a book row. Relations must be cleared first.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Remove every author/publisher edge for a book. Runs before row
    /// deletion so referential integrity holds.
    pub async fn clear_relations(&self, book_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM book_authors WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        sqlx::query("DELETE FROM book_publishers WHERE book_id = $1")
            .bind(book_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Link an author to a book; an existing edge is left untouched.
    pub async fn attach_author(&self, book_id: i64, author_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO book_authors (book_id, author_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(book_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Link a publisher to a book; an existing edge is left untouched.
    pub async fn attach_publisher(&self, book_id: i64, publisher_id: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO book_publishers (book_id, publisher_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(book_id)
        .bind(publisher_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Search with optional filters, ANDed. Joins are added only for the
    /// filters that need them, and DISTINCT keeps a book that matches
    /// through several joined rows from appearing twice.
    pub async fn search(&self, filters: &BookFilters<'_>) -> AppResult<Vec<Book>> {
        let mut query = QueryBuilder::<Postgres>::new(
            "SELECT DISTINCT b.id, b.isbn, b.title, b.publication_date, b.registration_date FROM books b",
        );

        if filters.author.is_some() {
            query.push(
                " LEFT JOIN book_authors ba ON ba.book_id = b.id \
                 LEFT JOIN authors a ON a.id = ba.author_id",
            );
        }
        if filters.publisher.is_some() {
            query.push(
                " LEFT JOIN book_publishers bp ON bp.book_id = b.id \
                 LEFT JOIN publishers p ON p.id = bp.publisher_id",
            );
        }

        query.push(" WHERE 1=1");

        if let Some(id) = filters.id {
            query.push(" AND b.id = ").push_bind(id);
        }
        if let Some(isbn) = filters.isbn {
            query.push(" AND b.isbn = ").push_bind(isbn.to_string());
        }
        if let Some(title) = filters.title {
            query
                .push(" AND b.title ILIKE ")
                .push_bind(format!("%{}%", title));
        }
        if let Some(author) = filters.author {
            query
                .push(" AND a.name ILIKE ")
                .push_bind(format!("%{}%", author));
        }
        if let Some(publisher) = filters.publisher {
            query
                .push(" AND p.name ILIKE ")
                .push_bind(format!("%{}%", publisher));
        }
        if let Some(date) = filters.publication_date {
            query.push(" AND b.publication_date = ").push_bind(date);
        }

        query.push(" ORDER BY b.id");

        let books = query
            .build_query_as::<Book>()
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }
}
