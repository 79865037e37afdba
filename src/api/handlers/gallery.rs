//! Gallery endpoint handlers

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, DeleteGalleryBody, GalleryImageBody, Json, SuccessResponse};
use crate::domain::GalleryItem;

/// GET /api/gallery
pub async fn list_gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    let items = state.gallery_service.list().await?;
    debug!(count = items.len(), "Listed gallery");

    Ok(Json(items))
}

/// POST /api/gallery
pub async fn add_to_gallery(
    State(state): State<AppState>,
    Json(body): Json<GalleryImageBody>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if body.prompt.trim().is_empty() || body.image_base64.trim().is_empty() {
        return Err(ApiError::bad_request("Missing required fields"));
    }

    state
        .gallery_service
        .append(&body.prompt, &body.image_base64)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/gallery
pub async fn delete_from_gallery(
    State(state): State<AppState>,
    Json(body): Json<DeleteGalleryBody>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if body.image_base64.trim().is_empty() {
        return Err(ApiError::bad_request("Missing imageBase64"));
    }

    state
        .gallery_service
        .delete_by_image_content(&body.image_base64)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
