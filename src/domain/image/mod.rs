//! Image domain - Upstream text-to-image generation

mod config;
mod generator;

pub use config::ImageConfig;
pub use generator::{ImageGenerator, ImageRequest};

#[cfg(test)]
pub use generator::MockImageGenerator;
