//! Barcode scanner endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::JsonBody;
use crate::{
    error::AppResult,
    models::{BibliographicRecord, Placement},
    AppState,
};

/// Scanned code and where the operator wants the book shelved
#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanRequest {
    pub barcode: String,
    /// Container name, also accepted as `placard`
    #[serde(alias = "placard")]
    pub container: String,
    pub shelf: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanResponse {
    pub book_info: BibliographicRecord,
    pub suggested_placement: Placement,
    pub message: String,
}

/// Resolve a scanned barcode before adding the book to the catalog
#[utoipa::path(
    post,
    path = "/barcode/scan",
    tag = "barcode",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Book found, waiting for confirmation", body = ScanResponse),
        (status = 404, description = "No source knows this code", body = crate::error::ErrorResponse)
    )
)]
pub async fn scan(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ScanRequest>,
) -> AppResult<Json<ScanResponse>> {
    let placement = Placement {
        container: request.container,
        shelf: request.shelf,
    };
    let result = state.services.barcode.scan(&request.barcode, placement).await?;

    let message = format!(
        "Livre trouvé via {} ! Vérifiez les informations avant de l'ajouter au placard {}, étagère {}.",
        result.record.source, result.placement.container, result.placement.shelf
    );

    Ok(Json(ScanResponse {
        book_info: result.record,
        suggested_placement: result.placement,
        message,
    }))
}
