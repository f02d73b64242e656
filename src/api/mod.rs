//! API handlers for the Bibliothèque REST endpoints

pub mod barcode;
pub mod books;
pub mod health;
pub mod isbn;
pub mod openapi;
pub mod storage;

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::HeaderValue,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use uuid::Uuid;

use crate::{
    config::CorsConfig,
    error::{AppError, AppResult},
    AppState,
};

/// JSON request body; malformed bodies are rejected with an `AppError`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Path parameters; rejected with an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// Query string; rejected with an `AppError`
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// Resource id from the path. A value that is not a UUID names nothing, hence `not_found`.
pub fn parse_id(raw: &str, not_found: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let api = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // ISBN lookup
        .route("/isbn/:code", get(isbn::lookup))
        .route("/isbn/:code/import", post(isbn::import))
        // Barcode scanner
        .route("/barcode/scan", post(barcode::scan))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Storage locations
        .route(
            "/placards",
            get(storage::list_placards).post(storage::create_placard),
        )
        .route("/placards/:id", delete(storage::delete_placard))
        .route(
            "/shelves",
            get(storage::list_shelves).post(storage::create_shelf),
        )
        .route("/shelves/:id", delete(storage::delete_shelf))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
