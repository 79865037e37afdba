//! Image generation service - credential resolution, rate limiting, upstream call

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{DomainError, ImageGenerator, ImageRequest, RateLimitDecision};
use crate::infrastructure::rate_limit::RateLimiter;

/// Request to generate an image
#[derive(Debug, Clone, Default)]
pub struct GenerateImageRequest {
    pub prompt: String,
    /// Caller-supplied credential; bypasses the rate limiter
    pub user_api_key: Option<String>,
    /// Reuse a fixed seed so sequential generations stay visually related
    pub iterative_mode: bool,
}

/// Result of a generation attempt
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    Generated {
        image: Value,
        /// Present when the request went through the limiter
        rate_limit: Option<RateLimitDecision>,
    },
    RateLimited(RateLimitDecision),
}

/// Orchestrates a single generation
#[derive(Clone)]
pub struct ImageGenerationService {
    generator: Arc<dyn ImageGenerator>,
    rate_limiter: RateLimiter,
    default_api_key: Option<String>,
    consistency_seed: u64,
}

impl std::fmt::Debug for ImageGenerationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageGenerationService")
            .field("provider", &self.generator.provider_name())
            .field("rate_limiter", &self.rate_limiter)
            .field("has_default_api_key", &self.default_api_key.is_some())
            .field("consistency_seed", &self.consistency_seed)
            .finish()
    }
}

impl ImageGenerationService {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        rate_limiter: RateLimiter,
        default_api_key: Option<String>,
        consistency_seed: u64,
    ) -> Self {
        Self {
            generator,
            rate_limiter,
            default_api_key: default_api_key.filter(|k| !k.trim().is_empty()),
            consistency_seed,
        }
    }

    /// Generate an image.
    ///
    /// `identify` is only invoked when the request is subject to rate
    /// limiting, i.e. when the caller did not supply their own credential.
    pub async fn generate<F>(
        &self,
        request: GenerateImageRequest,
        identify: F,
    ) -> Result<GenerationOutcome, DomainError>
    where
        F: FnOnce() -> String,
    {
        if request.prompt.trim().is_empty() {
            return Err(DomainError::validation("Prompt cannot be empty"));
        }

        let user_api_key = request.user_api_key.filter(|k| !k.trim().is_empty());
        let caller_supplied_key = user_api_key.is_some();

        let api_key = match user_api_key.or_else(|| self.default_api_key.clone()) {
            Some(key) => key,
            None => {
                return Err(DomainError::configuration(
                    "No image provider API key configured",
                ));
            }
        };

        let rate_limit = if caller_supplied_key {
            None
        } else {
            let identifier = identify();
            let decision = self.rate_limiter.check(&identifier).await?;

            if !decision.allowed {
                warn!(
                    identifier = %identifier,
                    count = decision.count,
                    limit = decision.limit,
                    "Rate limit exceeded"
                );
                return Ok(GenerationOutcome::RateLimited(decision));
            }

            Some(decision)
        };

        let seed = request.iterative_mode.then_some(self.consistency_seed);
        let image_request = ImageRequest::new(request.prompt, api_key)
            .with_caller_supplied_key(caller_supplied_key)
            .with_seed(seed);

        let image = self.generator.generate(image_request).await?;

        info!(
            provider = self.generator.provider_name(),
            caller_supplied_key = caller_supplied_key,
            iterative_mode = request.iterative_mode,
            "Image generated"
        );

        Ok(GenerationOutcome::Generated { image, rate_limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image::MockImageGenerator;
    use crate::domain::store::MockStore;
    use crate::domain::RateLimitConfig;
    use mockall::predicate::eq;
    use serde_json::json;

    fn limiter(limit: u32) -> RateLimiter {
        RateLimiter::new(Arc::new(MockStore::new()), RateLimitConfig::new(limit))
    }

    fn request(prompt: &str, user_api_key: Option<&str>, iterative_mode: bool) -> GenerateImageRequest {
        GenerateImageRequest {
            prompt: prompt.to_string(),
            user_api_key: user_api_key.map(str::to_string),
            iterative_mode,
        }
    }

    fn generator_expecting(expected: ImageRequest) -> MockImageGenerator {
        let mut generator = MockImageGenerator::new();
        generator
            .expect_generate()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(json!({ "b64_json": "aW1hZ2U=" })));
        generator.expect_provider_name().return_const("mock");
        generator
    }

    #[tokio::test]
    async fn test_generate_with_default_key() {
        let generator = generator_expecting(ImageRequest::new("fox", "server-key"));
        let service = ImageGenerationService::new(
            Arc::new(generator),
            limiter(100),
            Some("server-key".to_string()),
            123,
        );

        let outcome = service
            .generate(request("fox", None, false), || "1.2.3.4".to_string())
            .await
            .unwrap();

        match outcome {
            GenerationOutcome::Generated { image, rate_limit } => {
                assert_eq!(image["b64_json"], "aW1hZ2U=");
                assert_eq!(rate_limit.unwrap().count, 1);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_iterative_mode_passes_consistency_seed() {
        let expected = ImageRequest::new("fox", "server-key").with_seed(Some(123));
        let service = ImageGenerationService::new(
            Arc::new(generator_expecting(expected)),
            limiter(100),
            Some("server-key".to_string()),
            123,
        );

        let outcome = service
            .generate(request("fox", None, true), || "ip".to_string())
            .await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_user_key_bypasses_rate_limiter() {
        let expected = ImageRequest::new("fox", "user-key").with_caller_supplied_key(true);
        let service = ImageGenerationService::new(
            Arc::new(generator_expecting(expected)),
            limiter(0),
            Some("server-key".to_string()),
            123,
        );

        let outcome = service
            .generate(request("fox", Some("user-key"), false), || {
                panic!("identifier must not be computed for caller-supplied keys")
            })
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            GenerationOutcome::Generated { rate_limit: None, .. }
        ));
    }

    #[tokio::test]
    async fn test_rate_limited_request_skips_upstream() {
        let service = ImageGenerationService::new(
            Arc::new(generator_expecting(ImageRequest::new("fox", "server-key"))),
            limiter(1),
            Some("server-key".to_string()),
            123,
        );

        let first = service
            .generate(request("fox", None, false), || "ip".to_string())
            .await
            .unwrap();
        assert!(matches!(first, GenerationOutcome::Generated { .. }));

        let second = service
            .generate(request("fox", None, false), || "ip".to_string())
            .await
            .unwrap();
        assert!(matches!(second, GenerationOutcome::RateLimited(ref d) if d.count == 2));
    }

    #[tokio::test]
    async fn test_missing_credentials_is_configuration_error() {
        let service = ImageGenerationService::new(
            Arc::new(MockImageGenerator::new()),
            limiter(100),
            Some("   ".to_string()),
            123,
        );

        let result = service
            .generate(request("fox", Some(""), false), || "ip".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_blank_prompt_is_validation_error() {
        let service = ImageGenerationService::new(
            Arc::new(MockImageGenerator::new()),
            limiter(100),
            Some("key".to_string()),
            123,
        );

        let result = service
            .generate(request(" ", None, false), || "ip".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let mut generator = MockImageGenerator::new();
        generator
            .expect_generate()
            .returning(|_| Err(DomainError::upstream("mock", "boom")));
        let service = ImageGenerationService::new(
            Arc::new(generator),
            limiter(100),
            Some("key".to_string()),
            123,
        );

        let result = service
            .generate(request("fox", None, false), || "ip".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::Upstream { .. })));
    }
}
