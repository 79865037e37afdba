//! Rate limiter implementation
//!
//! Provides fixed-window rate limiting per client identifier, with one
//! window per UTC calendar day, backed by store counters.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::domain::rate_limit::{FailurePolicy, RateLimitConfig, RateLimitDecision};
use crate::domain::{DomainError, KeyValueStore};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Daily fixed-window rate limiter
#[derive(Debug, Clone)]
pub struct RateLimiter {
    store: Arc<dyn KeyValueStore>,
    config: RateLimitConfig,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn KeyValueStore>, config: RateLimitConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check and count a request at the current time
    pub async fn check(&self, identifier: &str) -> Result<RateLimitDecision, DomainError> {
        self.check_at(identifier, Utc::now()).await
    }

    /// Check and count a request at `now`.
    ///
    /// Every call increments the window counter exactly once; the request is
    /// allowed iff the post-increment count does not exceed the limit.
    pub async fn check_at(
        &self,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Result<RateLimitDecision, DomainError> {
        let window = Window::containing(now);
        let limit = self.config.requests_per_day;

        if !self.config.enabled {
            return Ok(RateLimitDecision {
                allowed: true,
                count: 0,
                limit,
                reset_at: window.end,
                bypassed: true,
            });
        }

        let key = self.counter_key(identifier, &window);

        let count = match self.store.increment(&key).await {
            Ok(count) => count,
            Err(e) => return self.on_store_failure(e, &window),
        };

        if count == 1 {
            let ttl = (window.end - now).to_std().unwrap_or_default();
            if let Err(e) = self.store.expire(&key, ttl).await {
                warn!(key = %key, error = %e, "Failed to set rate limit window expiry");
            }
        }

        let count = count.max(0) as u64;
        let allowed = count <= u64::from(limit);

        debug!(
            identifier = %identifier,
            count = count,
            limit = limit,
            allowed = allowed,
            "Rate limit checked"
        );

        Ok(RateLimitDecision {
            allowed,
            count,
            limit,
            reset_at: window.end,
            bypassed: false,
        })
    }

    fn on_store_failure(
        &self,
        error: DomainError,
        window: &Window,
    ) -> Result<RateLimitDecision, DomainError> {
        match self.config.failure_policy {
            FailurePolicy::FailOpen => {
                warn!(error = %error, "Rate limiting unavailable, allowing request");
                Ok(RateLimitDecision {
                    allowed: true,
                    count: 0,
                    limit: self.config.requests_per_day,
                    reset_at: window.end,
                    bypassed: true,
                })
            }
            FailurePolicy::FailClosed => Err(error),
        }
    }

    fn counter_key(&self, identifier: &str, window: &Window) -> String {
        format!("{}:{}:{}", self.config.key_prefix, identifier, window.index)
    }
}

/// A UTC-day-aligned window
#[derive(Debug, Clone, PartialEq, Eq)]
struct Window {
    index: i64,
    end: DateTime<Utc>,
}

impl Window {
    fn containing(now: DateTime<Utc>) -> Self {
        let index = now.timestamp_millis().div_euclid(DAY_MILLIS);
        let end = Utc
            .timestamp_millis_opt((index + 1) * DAY_MILLIS)
            .single()
            .unwrap_or(now);

        Self { index, end }
    }
}
