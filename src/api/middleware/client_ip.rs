//! Client identifier resolution for rate limiting

use axum::http::HeaderMap;

use crate::domain::rate_limit::FALLBACK_IDENTIFIER;

/// Resolve the caller's address from proxy headers.
///
/// Uses the first `X-Forwarded-For` entry, then `X-Real-IP`, then a fixed
/// fallback so that unidentifiable callers share one bucket.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(FALLBACK_IDENTIFIER)
        .to_string()
}
