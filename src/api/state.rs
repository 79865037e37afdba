//! Application state for shared services

use std::sync::Arc;

use crate::config::GeoBlockConfig;
use crate::domain::KeyValueStore;
use crate::infrastructure::services::{GalleryService, ImageGenerationService};

/// Shared state handed to every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub gallery_service: GalleryService,
    pub image_service: ImageGenerationService,
    pub store: Arc<dyn KeyValueStore>,
    pub geo_block: Arc<GeoBlockConfig>,
}

impl AppState {
    pub fn new(
        gallery_service: GalleryService,
        image_service: ImageGenerationService,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            gallery_service,
            image_service,
            store,
            geo_block: Arc::new(GeoBlockConfig::default()),
        }
    }

    pub fn with_geo_block(mut self, config: GeoBlockConfig) -> Self {
        self.geo_block = Arc::new(config);
        self
    }
}
