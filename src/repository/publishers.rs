//! Publishers repository

use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Publisher};

#[derive(Clone)]
pub struct PublishersRepository {
    pool: Pool<Postgres>,
}

impl PublishersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Look up a publisher by exact name; the oldest row wins.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<Publisher>> {
        let publisher = sqlx::query_as::<_, Publisher>(
            "SELECT id, name, registration_date FROM publishers WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(publisher)
    }

    /// Create a new publisher; the registration timestamp is set here, once.
    pub async fn create(&self, name: &str) -> AppResult<Publisher> {
        let publisher = sqlx::query_as::<_, Publisher>(
            r#"
            INSERT INTO publishers (name, registration_date)
            VALUES ($1, now())
            RETURNING id, name, registration_date
            "#,
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(publisher)
    }

    /// Load all publishers linked to a book via the junction table
    pub async fn list_for_book(&self, book_id: i64) -> AppResult<Vec<Publisher>> {
        let publishers = sqlx::query_as::<_, Publisher>(
            r#"
            SELECT p.id, p.name, p.registration_date
            FROM book_publishers bp
            JOIN publishers p ON p.id = bp.publisher_id
            WHERE bp.book_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(publishers)
    }
}
