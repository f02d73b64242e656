//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{barcode, books, health, isbn, storage};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bibliothèque API",
        version = "1.0.0",
        description = "Library catalog REST API with multi-source ISBN lookup",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::root,
        health::health_check,
        // ISBN
        isbn::lookup,
        isbn::import,
        // Barcode
        barcode::scan,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Storage
        storage::list_placards,
        storage::create_placard,
        storage::delete_placard,
        storage::list_shelves,
        storage::create_shelf,
        storage::delete_shelf,
    ),
    components(
        schemas(
            // Lookup
            crate::models::bibliographic::BibliographicRecord,
            crate::models::bibliographic::Placement,
            barcode::ScanRequest,
            barcode::ScanResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::BookSort,
            crate::models::book::SortOrder,
            crate::models::book::BookQuery,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            // Storage
            crate::models::storage::Placard,
            crate::models::storage::StorageType,
            crate::models::storage::CreatePlacard,
            crate::models::storage::Shelf,
            crate::models::storage::CreateShelf,
            // Health
            health::HealthResponse,
            health::WelcomeResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "isbn", description = "ISBN lookup across bibliographic sources"),
        (name = "barcode", description = "Barcode scanner intake"),
        (name = "books", description = "Catalog management"),
        (name = "storage", description = "Placards and shelves")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
