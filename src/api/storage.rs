//! Placard and shelf endpoints

use axum::{extract::State, http::StatusCode, Json};

use super::{parse_id, JsonBody, PathParam, QueryParams};
use crate::{
    error::AppResult,
    models::storage::{CreatePlacard, CreateShelf, Placard, Shelf, ShelfQuery},
    AppState,
};

const PLACARD_NOT_FOUND: &str = "Placard non trouvé";
const SHELF_NOT_FOUND: &str = "Étagère non trouvée";

/// List placards
#[utoipa::path(
    get,
    path = "/placards",
    tag = "storage",
    responses(
        (status = 200, description = "List of placards", body = Vec<Placard>)
    )
)]
pub async fn list_placards(State(state): State<AppState>) -> AppResult<Json<Vec<Placard>>> {
    let placards = state.services.storage.list_placards().await?;
    Ok(Json(placards))
}

/// Create a placard
#[utoipa::path(
    post,
    path = "/placards",
    tag = "storage",
    request_body = CreatePlacard,
    responses(
        (status = 201, description = "Placard created", body = Placard),
        (status = 409, description = "Placard name already used", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_placard(
    State(state): State<AppState>,
    JsonBody(placard): JsonBody<CreatePlacard>,
) -> AppResult<(StatusCode, Json<Placard>)> {
    let created = state.services.storage.create_placard(placard).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a placard
#[utoipa::path(
    delete,
    path = "/placards/{id}",
    tag = "storage",
    params(
        ("id" = String, Path, description = "Placard ID (UUID)")
    ),
    responses(
        (status = 204, description = "Placard deleted"),
        (status = 404, description = "Placard not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_placard(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, PLACARD_NOT_FOUND)?;
    state.services.storage.delete_placard(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List shelves
#[utoipa::path(
    get,
    path = "/shelves",
    tag = "storage",
    params(ShelfQuery),
    responses(
        (status = 200, description = "List of shelves", body = Vec<Shelf>)
    )
)]
pub async fn list_shelves(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ShelfQuery>,
) -> AppResult<Json<Vec<Shelf>>> {
    let shelves = state
        .services
        .storage
        .list_shelves(query.placard.as_deref())
        .await?;
    Ok(Json(shelves))
}

/// Create a shelf
#[utoipa::path(
    post,
    path = "/shelves",
    tag = "storage",
    request_body = CreateShelf,
    responses(
        (status = 201, description = "Shelf created", body = Shelf),
        (status = 409, description = "Shelf already exists in this placard", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_shelf(
    State(state): State<AppState>,
    JsonBody(shelf): JsonBody<CreateShelf>,
) -> AppResult<(StatusCode, Json<Shelf>)> {
    let created = state.services.storage.create_shelf(shelf).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a shelf
#[utoipa::path(
    delete,
    path = "/shelves/{id}",
    tag = "storage",
    params(
        ("id" = String, Path, description = "Shelf ID (UUID)")
    ),
    responses(
        (status = 204, description = "Shelf deleted"),
        (status = 404, description = "Shelf not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_shelf(
    State(state): State<AppState>,
    PathParam(id): PathParam<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, SHELF_NOT_FOUND)?;
    state.services.storage.delete_shelf(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
