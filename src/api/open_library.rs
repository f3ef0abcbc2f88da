//! OpenLibrary lookup endpoint

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{error::AppResult, models::RemoteBook};

#[derive(Debug, Deserialize, IntoParams)]
pub struct OpenLibraryQuery {
    /// ISBN-10 or ISBN-13; separators are allowed
    pub isbn: Option<String>,
}

/// Look up book metadata on OpenLibrary by ISBN
#[utoipa::path(
    get,
    path = "/open-library",
    tag = "open-library",
    params(OpenLibraryQuery),
    responses(
        (status = 200, description = "Book metadata", body = RemoteBook),
        (status = 400, description = "Invalid or unknown ISBN", body = crate::error::ErrorResponse),
        (status = 502, description = "OpenLibrary unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_isbn(
    State(state): State<crate::AppState>,
    Query(query): Query<OpenLibraryQuery>,
) -> AppResult<Json<RemoteBook>> {
    let isbn = query.isbn.unwrap_or_default();
    let book = state.services.open_library.find_by_isbn(&isbn).await?;
    Ok(Json(book))
}
