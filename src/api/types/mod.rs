//! HTTP request and response types

pub mod error;
pub mod gallery;
pub mod image;
pub mod json;

pub use error::{ApiError, ApiErrorResponse};
pub use gallery::{DeleteGalleryBody, GalleryImageBody, SuccessResponse};
pub use image::GenerateImagesBody;
pub use json::Json;
