//! Book endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    models::{BookInput, BookQuery, BookView, ImportReport},
};

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookView),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_id(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookView>> {
    let book = state.services.books.find_by_id(id).await?;
    Ok(Json(book))
}

/// Create a book, or update the one already holding the same ISBN
#[utoipa::path(
    post,
    path = "/book",
    tag = "books",
    request_body = BookInput,
    responses(
        (status = 201, description = "Book created or updated", body = BookView),
        (status = 400, description = "Missing ISBN or title", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_or_update(
    State(state): State<crate::AppState>,
    Json(input): Json<BookInput>,
) -> AppResult<(StatusCode, Json<BookView>)> {
    let book = state.services.books.create_or_update(&input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/book/{id}",
    tag = "books",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete_by_id(id).await?;
    Ok(StatusCode::OK)
}

/// Search books with optional filters
#[utoipa::path(
    get,
    path = "/book",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookView>),
        (status = 404, description = "No books matched", body = crate::error::ErrorResponse)
    )
)]
pub async fn find_by_parameters(
    State(state): State<crate::AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<Vec<BookView>>> {
    let books = state.services.books.find_by_parameters(&query).await?;
    Ok(Json(books))
}

/// Import books from a semicolon-separated CSV file
#[utoipa::path(
    post,
    path = "/book/import",
    tag = "books",
    responses(
        (status = 200, description = "Import report", body = ImportReport),
        (status = 400, description = "Missing, empty or non-CSV file", body = crate::error::ErrorResponse)
    )
)]
pub async fn import_csv(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::FileImport(format!("Failed to read the upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::FileImport(format!("Failed to read the file: {}", e)))?;

        let report = state
            .services
            .import
            .import(file_name.as_deref(), &data)
            .await?;
        return Ok(Json(report));
    }

    Err(AppError::FileImport("No file was provided".to_string()))
}
