//! Error types for the Libris server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidIsbn(String),

    #[error("{0}")]
    MetadataNotFound(String),

    #[error("{0}")]
    ExternalService(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    FileImport(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Error response body returned on every failed request
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

impl AppError {
    /// HTTP status and symbolic error code for the boundary mapping
    pub fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::InvalidIsbn(_) => (StatusCode::BAD_REQUEST, "ISBN_INVALIDO"),
            AppError::MetadataNotFound(_) => (StatusCode::BAD_REQUEST, "ISBN_NAO_ENCONTRADO"),
            AppError::ExternalService(_) => (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::FileImport(_) => (StatusCode::BAD_REQUEST, "READ_FILE_ERROR"),
            AppError::Database(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

/// Error parts carried as a response extension. `IntoResponse` has no view
/// of the request, so the path middleware (see `api::error_path_layer`)
/// rebuilds the body with the request path from these.
#[derive(Clone)]
pub struct ErrorParts {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            status: status.as_u16(),
            error: code.to_string(),
            message: message.clone(),
            path: String::new(),
            timestamp: Utc::now(),
        });

        let mut response = (status, body).into_response();
        response
            .extensions_mut()
            .insert(ErrorParts { status, code, message });
        response
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_each_error_to_its_status_and_code() {
        let cases = [
            (
                AppError::InvalidIsbn("bad".into()),
                StatusCode::BAD_REQUEST,
                "ISBN_INVALIDO",
            ),
            (
                AppError::MetadataNotFound("missing".into()),
                StatusCode::BAD_REQUEST,
                "ISBN_NAO_ENCONTRADO",
            ),
            (
                AppError::ExternalService("down".into()),
                StatusCode::BAD_GATEWAY,
                "EXTERNAL_SERVICE_ERROR",
            ),
            (
                AppError::NotFound("gone".into()),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                AppError::BadRequest("nope".into()),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                AppError::FileImport("unreadable".into()),
                StatusCode::BAD_REQUEST,
                "READ_FILE_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.parts(), (status, code));
        }
    }

    #[test]
    fn error_message_survives_the_mapping() {
        let error = AppError::NotFound("Book with id 7 not found".into());
        assert_eq!(error.to_string(), "Book with id 7 not found");
    }
}
