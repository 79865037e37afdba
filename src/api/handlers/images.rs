//! Image generation endpoint

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::api::middleware::client_identifier;
use crate::api::state::AppState;
use crate::api::types::{ApiError, GenerateImagesBody, Json};
use crate::domain::RateLimitDecision;
use crate::infrastructure::services::GenerationOutcome;

pub const RATE_LIMITED_MESSAGE: &str =
    "No requests left. Please add your own API key or try again in 24h.";

const LIMIT_HEADER: &str = "x-ratelimit-limit";
const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// POST /api/generateImages
pub async fn generate_images(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateImagesBody>,
) -> Result<Response, ApiError> {
    debug!(iterative_mode = body.iterative_mode, "Generating image");

    let outcome = state
        .image_service
        .generate(body.into(), || client_identifier(&headers))
        .await?;

    match outcome {
        GenerationOutcome::Generated { image, rate_limit } => {
            let mut response = Json(image).into_response();
            if let Some(decision) = rate_limit.filter(|d| !d.bypassed) {
                insert_rate_limit_headers(response.headers_mut(), &decision);
            }
            Ok(response)
        }
        GenerationOutcome::RateLimited(decision) => Err(ApiError::rate_limited(RATE_LIMITED_MESSAGE)
            .with_header(LIMIT_HEADER, decision.limit.to_string())
            .with_header(REMAINING_HEADER, decision.remaining().to_string())
            .with_header(RESET_HEADER, decision.reset_at.timestamp().to_string())),
    }
}

fn insert_rate_limit_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    let values = [
        (LIMIT_HEADER, u64::from(decision.limit)),
        (REMAINING_HEADER, decision.remaining()),
        (RESET_HEADER, decision.reset_at.timestamp().max(0) as u64),
    ];

    for (name, value) in values {
        headers.insert(HeaderName::from_static(name), HeaderValue::from(value));
    }
}
