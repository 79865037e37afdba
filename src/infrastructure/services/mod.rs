//! Application services

mod gallery_service;
mod image_service;

pub use gallery_service::GalleryService;
pub use image_service::{GenerateImageRequest, GenerationOutcome, ImageGenerationService};
