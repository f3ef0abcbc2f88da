//! Publisher model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Full publisher model from database. The registration timestamp is set
/// by the repository at insert time and never touched afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Publisher {
    pub id: i64,
    pub name: String,
    pub registration_date: Option<DateTime<Utc>>,
}

/// Name-only publisher reference, as it arrives in request bodies, CSV rows
/// and OpenLibrary documents
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublisherInput {
    pub name: String,
}

/// Publisher representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublisherView {
    pub id: i64,
    pub name: String,
}

impl From<&Publisher> for PublisherView {
    fn from(publisher: &Publisher) -> Self {
        Self {
            id: publisher.id,
            name: publisher.name.clone(),
        }
    }
}
