//! Gallery configuration

use serde::{Deserialize, Serialize};

use super::{DEFAULT_GALLERY_KEY, DEFAULT_LIST_LIMIT};

/// Gallery storage and listing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Sorted-set key holding the gallery
    pub set_key: String,
    /// Maximum number of items returned by a listing
    pub list_limit: usize,
    /// Return an empty listing when no remote store is configured
    pub empty_when_unconfigured: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            set_key: DEFAULT_GALLERY_KEY.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            empty_when_unconfigured: true,
        }
    }
}

impl GalleryConfig {
    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }
}
