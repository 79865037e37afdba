//! Gallery and download request/response bodies

use serde::{Deserialize, Serialize};

/// Body of `POST /api/gallery` and `POST /api/download`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageBody {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub image_base64: String,
}

/// Body of `DELETE /api/gallery`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteGalleryBody {
    #[serde(default)]
    pub image_base64: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
