//! Image generator trait

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// A text-to-image generation request, after credential resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    pub prompt: String,
    /// Effective credential for the upstream call
    pub api_key: String,
    /// Whether `api_key` was supplied by the caller
    pub caller_supplied_key: bool,
    /// Fixed seed for visually consistent sequential generations
    pub seed: Option<u64>,
}

impl ImageRequest {
    pub fn new(prompt: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            api_key: api_key.into(),
            caller_supplied_key: false,
            seed: None,
        }
    }

    pub fn with_caller_supplied_key(mut self, supplied: bool) -> Self {
        self.caller_supplied_key = supplied;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Upstream text-to-image provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generates one image and returns the provider's image object as-is
    async fn generate(&self, request: ImageRequest) -> Result<Value, DomainError>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}
