//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Name-only author reference, as it arrives in request bodies and CSV rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorInput {
    pub name: String,
}

/// Author representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthorView {
    pub id: i64,
    pub name: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            name: author.name.clone(),
        }
    }
}
