//! Application endpoints under `/api`

pub mod download;
pub mod gallery;
pub mod images;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create the `/api` router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/generateImages", post(images::generate_images))
        .route(
            "/gallery",
            get(gallery::list_gallery)
                .post(gallery::add_to_gallery)
                .delete(gallery::delete_from_gallery),
        )
        .route("/download", post(download::download_image))
}
