//! ISBN lookup endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{JsonBody, PathParam};
use crate::{
    error::AppResult,
    models::{Book, BibliographicRecord, Placement},
    AppState,
};

/// Look up a book by ISBN across the bibliographic sources
#[utoipa::path(
    get,
    path = "/isbn/{code}",
    tag = "isbn",
    params(
        ("code" = String, Path, description = "ISBN-10 or ISBN-13")
    ),
    responses(
        (status = 200, description = "Book information", body = BibliographicRecord),
        (status = 404, description = "No source knows this code", body = crate::error::ErrorResponse)
    )
)]
pub async fn lookup(
    State(state): State<AppState>,
    PathParam(code): PathParam<String>,
) -> AppResult<Json<BibliographicRecord>> {
    let record = state.services.isbn.resolve(&code).await?;
    Ok(Json(record))
}

/// Look up a book by ISBN and add it to the catalog at the given placement
#[utoipa::path(
    post,
    path = "/isbn/{code}/import",
    tag = "isbn",
    params(
        ("code" = String, Path, description = "ISBN-10 or ISBN-13")
    ),
    request_body = Placement,
    responses(
        (status = 201, description = "Book added to the catalog", body = Book),
        (status = 404, description = "No source knows this code", body = crate::error::ErrorResponse)
    )
)]
pub async fn import(
    State(state): State<AppState>,
    PathParam(code): PathParam<String>,
    JsonBody(placement): JsonBody<Placement>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state
        .services
        .catalog
        .import_from_lookup(&code, placement)
        .await?;
    Ok((StatusCode::CREATED, Json(book)))
}
