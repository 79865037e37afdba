//! Health check endpoints for container probes

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Result of probing one dependency
#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub backend: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: HealthStatus::Healthy,
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: None,
        }),
    )
}

/// GET /live
pub async fn live_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /ready
///
/// A failing store reports `degraded` with status 200.
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let store_check = check_store(&state).await;
    let status = store_check.status;

    (
        StatusCode::OK,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: Some(vec![store_check]),
        }),
    )
}

async fn check_store(state: &AppState) -> HealthCheck {
    let start = Instant::now();
    let set_key = &state.gallery_service.config().set_key;
    let result = state.store.range_latest(set_key, 1).await;

    let (status, message) = match result {
        Ok(_) => (HealthStatus::Healthy, None),
        Err(e) => (HealthStatus::Degraded, Some(e.to_string())),
    };

    HealthCheck {
        name: "store".to_string(),
        backend: state.store.backend_name().to_string(),
        status,
        message,
        latency_ms: start.elapsed().as_millis() as u64,
    }
}
