use serde::Deserialize;

use crate::domain::gallery::GalleryConfig;
use crate::domain::image::ImageConfig;
use crate::domain::RateLimitConfig;
use crate::infrastructure::store::StoreConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub store: StoreConfig,
    pub rate_limit: RateLimitConfig,
    pub gallery: GalleryConfig,
    pub image: ImageConfig,
    pub geo_block: GeoBlockConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Country-based request blocking
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeoBlockConfig {
    /// Header carrying the ISO country code set by the edge proxy
    pub country_header: String,
    /// Country codes that receive 403
    pub blocked_countries: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GeoBlockConfig {
    fn default() -> Self {
        Self {
            country_header: "x-vercel-ip-country".to_string(),
            blocked_countries: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from config files and `APP__`-prefixed environment variables,
    /// then apply the conventional provider variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("geo_block.blocked_countries")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: Self = config.try_deserialize()?;
        app_config.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(app_config)
    }

    /// Apply `REDIS_URL`, `TOGETHER_API_KEY` and `HELICONE_API_KEY`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("REDIS_URL") {
            self.store.redis_url = Some(url);
        }

        if let Some(key) = lookup("TOGETHER_API_KEY") {
            self.image.api_key = Some(key);
        }

        if let Some(key) = lookup("HELICONE_API_KEY").filter(|k| !k.is_empty()) {
            self.image.observability_api_key = Some(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FailurePolicy;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.rate_limit.requests_per_day, 100);
        assert_eq!(config.gallery.list_limit, 50);
        assert_eq!(config.geo_block.country_header, "x-vercel-ip-country");
        assert!(config.geo_block.blocked_countries.is_empty());
        assert!(config.store.redis_url.is_none());
    }

    #[test]
    fn test_partial_sections_deserialize() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "server": { "port": 3000 },
                "rate_limit": { "failure_policy": "fail_closed" },
                "geo_block": { "blocked_countries": ["RU"] }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.rate_limit.failure_policy, FailurePolicy::FailClosed);
        assert_eq!(config.geo_block.blocked_countries, vec!["RU"]);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("REDIS_URL", "redis://cache:6379"),
            ("TOGETHER_API_KEY", "together-key"),
            ("HELICONE_API_KEY", ""),
        ]);

        let mut config = AppConfig::default();
        config.apply_env_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.store.redis_url.as_deref(), Some("redis://cache:6379"));
        assert_eq!(config.image.api_key.as_deref(), Some("together-key"));
        assert!(config.image.observability_api_key.is_none());
    }
}
