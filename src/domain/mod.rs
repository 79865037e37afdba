//! Domain layer - Core business logic and entities

pub mod error;
pub mod gallery;
pub mod image;
pub mod rate_limit;
pub mod store;

pub use error::DomainError;
pub use gallery::{GalleryItem, GalleryValidationError, StoredEntry};
pub use image::{ImageGenerator, ImageRequest};
pub use rate_limit::{FailurePolicy, RateLimitConfig, RateLimitDecision};
pub use store::KeyValueStore;
