//! Gallery input validation utilities

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::DomainError;

/// Characters kept verbatim in download filenames
static FILENAME_UNSAFE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[^a-z0-9]").unwrap());

/// Gallery validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryValidationError {
    /// Prompt is empty or whitespace
    EmptyPrompt,
    /// Image payload is empty
    EmptyImage,
    /// Image payload is not standard base64
    InvalidBase64 { reason: String },
}

impl fmt::Display for GalleryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPrompt => write!(f, "Prompt cannot be empty"),
            Self::EmptyImage => write!(f, "Missing imageBase64"),
            Self::InvalidBase64 { reason } => {
                write!(f, "imageBase64 is not valid base64: {}", reason)
            }
        }
    }
}

impl std::error::Error for GalleryValidationError {}

impl From<GalleryValidationError> for DomainError {
    fn from(err: GalleryValidationError) -> Self {
        DomainError::validation(err.to_string())
    }
}

pub fn validate_prompt(prompt: &str) -> Result<(), GalleryValidationError> {
    if prompt.trim().is_empty() {
        return Err(GalleryValidationError::EmptyPrompt);
    }
    Ok(())
}

/// Validate and decode an image payload
pub fn decode_image_base64(image: &str) -> Result<Vec<u8>, GalleryValidationError> {
    if image.trim().is_empty() {
        return Err(GalleryValidationError::EmptyImage);
    }

    STANDARD
        .decode(image)
        .map_err(|e| GalleryValidationError::InvalidBase64 {
            reason: e.to_string(),
        })
}

/// Turn a prompt into a lowercase filename stem made of `[a-z0-9_]`
pub fn sanitize_filename(input: &str) -> String {
    let sanitized = FILENAME_UNSAFE.replace_all(input, "_").to_lowercase();

    if sanitized.is_empty() {
        "image".to_string()
    } else {
        sanitized
    }
}
