//! Image generation request body

use serde::Deserialize;

use crate::infrastructure::services::GenerateImageRequest;

/// Body of `POST /api/generateImages`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImagesBody {
    pub prompt: String,
    #[serde(rename = "userAPIKey", default)]
    pub user_api_key: Option<String>,
    pub iterative_mode: bool,
}

impl From<GenerateImagesBody> for GenerateImageRequest {
    fn from(body: GenerateImagesBody) -> Self {
        Self {
            prompt: body.prompt,
            user_api_key: body.user_api_key,
            iterative_mode: body.iterative_mode,
        }
    }
}
