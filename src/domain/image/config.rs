//! Image provider configuration

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_OBSERVABILITY_BASE_URL: &str = "https://together.helicone.ai/v1";
pub const DEFAULT_IMAGE_MODEL: &str = "black-forest-labs/FLUX.1-schnell";

/// Upstream image generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Provider API base URL
    pub base_url: String,
    /// Default credential, overridable per request
    pub api_key: Option<String>,
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    /// Seed used when consistency mode is requested
    pub consistency_seed: u64,
    pub timeout_secs: u64,
    /// Routes requests through the observability proxy when set
    pub observability_api_key: Option<String>,
    pub observability_base_url: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_TOGETHER_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_IMAGE_MODEL.to_string(),
            width: 1024,
            height: 768,
            steps: 3,
            consistency_seed: 123,
            timeout_secs: 60,
            observability_api_key: None,
            observability_base_url: DEFAULT_OBSERVABILITY_BASE_URL.to_string(),
        }
    }
}

impl ImageConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_observability(
        mut self,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        self.observability_api_key = Some(api_key.into());
        self.observability_base_url = base_url.into();
        self
    }

    /// Default credential, ignoring blank values
    pub fn default_api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_provider_settings() {
        let config = ImageConfig::default();

        assert_eq!(config.model, "black-forest-labs/FLUX.1-schnell");
        assert_eq!((config.width, config.height), (1024, 768));
        assert_eq!(config.steps, 3);
        assert_eq!(config.consistency_seed, 123);
    }

    #[test]
    fn test_blank_default_key_is_ignored() {
        assert_eq!(ImageConfig::default().with_api_key("  ").default_api_key(), None);
        assert_eq!(
            ImageConfig::default().with_api_key("key").default_api_key(),
            Some("key")
        );
    }
}
