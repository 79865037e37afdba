//! Gallery domain - Archived images and their stored form

mod config;
mod entity;
mod validation;

pub use config::GalleryConfig;
pub use entity::{GalleryItem, StoredEntry};
pub use validation::{
    decode_image_base64, sanitize_filename, validate_prompt, GalleryValidationError,
};

/// Default number of items returned by a gallery listing
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// Default sorted-set key holding the gallery
pub const DEFAULT_GALLERY_KEY: &str = "gallery";
