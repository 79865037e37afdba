use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::image::ImageConfig;
use crate::domain::{DomainError, ImageGenerator, ImageRequest};

const PROVIDER: &str = "together";

/// Together AI image generation client
#[derive(Debug, Clone)]
pub struct TogetherImageClient {
    client: reqwest::Client,
    config: ImageConfig,
}

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    width: u32,
    height: u32,
    steps: u32,
    n: u32,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

impl TogetherImageClient {
    pub fn new(config: ImageConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        let url = match &self.config.observability_api_key {
            Some(_) => &self.config.observability_base_url,
            None => &self.config.base_url,
        };
        url.trim_end_matches('/')
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url())
    }

    fn headers(&self, request: &ImageRequest) -> Vec<(&'static str, String)> {
        let mut headers = vec![("Authorization", format!("Bearer {}", request.api_key))];

        if let Some(key) = &self.config.observability_api_key {
            headers.push(("Helicone-Auth", format!("Bearer {}", key)));
            headers.push((
                "Helicone-Property-BYOK",
                request.caller_supplied_key.to_string(),
            ));
        }

        headers
    }

    fn build_body<'a>(&'a self, request: &'a ImageRequest) -> GenerationBody<'a> {
        GenerationBody {
            model: &self.config.model,
            prompt: &request.prompt,
            width: self.config.width,
            height: self.config.height,
            steps: self.config.steps,
            n: 1,
            response_format: "base64",
            seed: request.seed,
        }
    }
}

#[async_trait]
impl ImageGenerator for TogetherImageClient {
    async fn generate(&self, request: ImageRequest) -> Result<Value, DomainError> {
        let mut builder = self.client.post(self.generations_url());

        for (name, value) in self.headers(&request) {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(&self.build_body(&request))
            .send()
            .await
            .map_err(|e| DomainError::upstream(PROVIDER, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::upstream(
                PROVIDER,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let mut body: Value = response
            .json()
            .await
            .map_err(|e| DomainError::upstream(PROVIDER, format!("Failed to parse response: {}", e)))?;

        match body.get_mut("data").and_then(Value::as_array_mut) {
            Some(data) if !data.is_empty() => Ok(data.swap_remove(0)),
            _ => Err(DomainError::upstream(PROVIDER, "No images in response")),
        }
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}
