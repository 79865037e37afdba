//! Blinkshot server
//!
//! Backend for a realtime text-to-image app: proxies generation requests to
//! Together AI under a per-client daily quota and keeps a shared gallery of
//! generated images in a sorted-set store (Redis or in-memory).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use infrastructure::{
    image::TogetherImageClient,
    rate_limit::RateLimiter,
    services::{GalleryService, ImageGenerationService},
    store::StoreFactory,
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = StoreFactory::new().create(&config.store).await;
    info!(backend = store.backend_name(), "Store initialized");

    let rate_limiter = RateLimiter::new(store.clone(), config.rate_limit.clone());
    info!(
        enabled = config.rate_limit.enabled,
        requests_per_day = config.rate_limit.requests_per_day,
        failure_policy = %config.rate_limit.failure_policy,
        "Rate limiter initialized"
    );

    let gallery_service = GalleryService::new(store.clone(), config.gallery.clone())
        .with_remote_configured(config.store.is_configured());

    let generator = TogetherImageClient::new(config.image.clone())?;
    let default_api_key = config.image.default_api_key().map(str::to_string);
    if default_api_key.is_none() {
        info!("No server image API key configured, callers must supply their own");
    }

    let image_service = ImageGenerationService::new(
        Arc::new(generator),
        rate_limiter,
        default_api_key,
        config.image.consistency_seed,
    );

    Ok(AppState::new(gallery_service, image_service, store)
        .with_geo_block(config.geo_block.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_defaults_to_memory() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.store.backend_name(), "in_memory");
        assert!(state.geo_block.blocked_countries.is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_gallery_lists_empty() {
        let state = create_app_state().await.unwrap();

        let items = state.gallery_service.list().await.unwrap();
        assert!(items.is_empty());
    }
}
