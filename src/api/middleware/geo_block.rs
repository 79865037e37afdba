//! Country-based request blocking

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::state::AppState;
use crate::config::GeoBlockConfig;

/// Reject requests whose edge-reported country is on the block list
pub async fn geo_block_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let country = request
        .headers()
        .get(state.geo_block.country_header.as_str())
        .and_then(|v| v.to_str().ok());

    if let Some(country) = country {
        if is_blocked(&state.geo_block, country) {
            warn!(country = %country, path = %request.uri().path(), "Blocked request by country");
            return (StatusCode::FORBIDDEN, "Access Denied").into_response();
        }
    }

    next.run(request).await
}

fn is_blocked(config: &GeoBlockConfig, country: &str) -> bool {
    let country = country.trim();
    config
        .blocked_countries
        .iter()
        .any(|blocked| blocked.trim().eq_ignore_ascii_case(country))
}
