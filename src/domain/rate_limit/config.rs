//! Rate limit configuration and decisions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};


/// What the limiter does when the backing store fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Let the request through unlimited
    #[default]
    FailOpen,
    /// Surface the store error to the caller
    FailClosed,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FailOpen => write!(f, "fail_open"),
            Self::FailClosed => write!(f, "fail_closed"),
        }
    }
}

/// Fixed-window (one UTC day) rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Whether rate limiting is enabled
    pub enabled: bool,
    /// Maximum requests per identifier per UTC day
    pub requests_per_day: u32,
    /// Prefix for counter keys
    pub key_prefix: String,
    /// Behavior when the store is unavailable
    pub failure_policy: FailurePolicy,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_day: 100,
            key_prefix: "blinkshot".to_string(),
            failure_policy: FailurePolicy::FailOpen,
        }
    }
}

impl RateLimitConfig {
    pub fn new(requests_per_day: u32) -> Self {
        Self {
            requests_per_day,
            ..Default::default()
        }
    }

    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Outcome of a single rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Counter value after this check (0 when the store was not consulted)
    pub count: u64,
    /// Configured daily limit
    pub limit: u32,
    /// End of the current window
    pub reset_at: DateTime<Utc>,
    /// Set when the request was not counted: limiter disabled or store failed
    pub bypassed: bool,
}

impl RateLimitDecision {
    pub fn remaining(&self) -> u64 {
        u64::from(self.limit).saturating_sub(self.count)
    }
}
