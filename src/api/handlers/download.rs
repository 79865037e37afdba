//! Image download endpoint

use axum::{
    http::header,
    response::{IntoResponse, Response},
};

use crate::api::types::{ApiError, GalleryImageBody, Json};
use crate::domain::gallery::{decode_image_base64, sanitize_filename};
use crate::domain::DomainError;

/// POST /api/download
///
/// Returns the decoded PNG as an attachment named after the prompt.
pub async fn download_image(Json(body): Json<GalleryImageBody>) -> Result<Response, ApiError> {
    let bytes = decode_image_base64(&body.image_base64).map_err(DomainError::from)?;
    let disposition = format!(
        "attachment; filename=\"{}.png\"",
        sanitize_filename(&body.prompt)
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
