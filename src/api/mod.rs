//! API handlers for the Libris REST endpoints

pub mod books;
pub mod health;
pub mod open_library;
pub mod openapi;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::error::{ErrorParts, ErrorResponse};

/// Fills the request path into error bodies. `AppError::into_response`
/// stores its parts as a response extension because it cannot see the
/// request; this layer rebuilds the body with the real path.
pub async fn error_path_layer(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let response = next.run(request).await;

    let Some(parts) = response.extensions().get::<ErrorParts>().cloned() else {
        return response;
    };

    let body = ErrorResponse {
        status: parts.status.as_u16(),
        error: parts.code.to_string(),
        message: parts.message,
        path,
        timestamp: Utc::now(),
    };

    (parts.status, Json(body)).into_response()
}
