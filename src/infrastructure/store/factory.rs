//! Store factory for startup selection

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::KeyValueStore;

use super::in_memory::InMemoryStore;
use super::redis::{RedisStore, RedisStoreConfig};

/// Values shipped in sample env files that must not be treated as credentials
const PLACEHOLDER_URLS: &[&str] = &["your_redis_url_here"];

/// Configuration for store selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis URL; absent means the in-memory store is used
    pub redis_url: Option<String>,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            connection_timeout_secs: 5,
        }
    }
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn redis(url: impl Into<String>) -> Self {
        Self {
            redis_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Whether real remote credentials are present
    pub fn is_configured(&self) -> bool {
        self.usable_url().is_some()
    }

    fn usable_url(&self) -> Option<&str> {
        self.redis_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && !PLACEHOLDER_URLS.contains(url))
    }
}

/// Factory for creating store instances
#[derive(Debug, Default)]
pub struct StoreFactory;

impl StoreFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the configured store, downgrading to memory on any failure
    pub async fn create(&self, config: &StoreConfig) -> Arc<dyn KeyValueStore> {
        let Some(url) = config.usable_url() else {
            info!("Redis not configured, using in-memory store");
            return self.create_in_memory();
        };

        let redis_config = RedisStoreConfig::new(url)
            .with_connection_timeout(Duration::from_secs(config.connection_timeout_secs));

        match RedisStore::connect(&redis_config).await {
            Ok(store) => {
                info!("Connected to Redis store");
                Arc::new(store)
            }
            Err(e) => {
                warn!(error = %e, "Failed to initialize Redis store, falling back to in-memory");
                self.create_in_memory()
            }
        }
    }

    pub fn create_in_memory(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(InMemoryStore::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_configured() {
        assert!(!StoreConfig::in_memory().is_configured());
        assert!(!StoreConfig::redis("").is_configured());
        assert!(!StoreConfig::redis("  ").is_configured());
        assert!(!StoreConfig::redis("your_redis_url_here").is_configured());
        assert!(StoreConfig::redis("redis://localhost:6379").is_configured());
    }

    #[tokio::test]
    async fn test_factory_create_in_memory_without_url() {
        let store = StoreFactory::new().create(&StoreConfig::in_memory()).await;
        assert_eq!(store.backend_name(), "in_memory");
    }

    #[tokio::test]
    async fn test_factory_falls_back_on_invalid_url() {
        let store = StoreFactory::new()
            .create(&StoreConfig::redis("definitely not a url"))
            .await;
        assert_eq!(store.backend_name(), "in_memory");
    }

    #[tokio::test]
    async fn test_factory_falls_back_on_unreachable_redis() {
        let mut config = StoreConfig::redis("redis://127.0.0.1:1");
        config.connection_timeout_secs = 1;

        let store = StoreFactory::new().create(&config).await;
        assert_eq!(store.backend_name(), "in_memory");
    }
}
