//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, open_library};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Libris API",
        version = "1.0.0",
        description = "Book Catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::find_by_id,
        books::create_or_update,
        books::delete,
        books::find_by_parameters,
        books::import_csv,
        // OpenLibrary
        open_library::find_by_isbn,
    ),
    components(
        schemas(
            crate::models::book::BookView,
            crate::models::book::BookInput,
            crate::models::book::RemoteBook,
            crate::models::author::AuthorView,
            crate::models::author::AuthorInput,
            crate::models::publisher::PublisherView,
            crate::models::publisher::PublisherInput,
            crate::models::import_report::ImportReport,
            crate::models::import_report::ImportError,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "open-library", description = "OpenLibrary metadata lookups")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
