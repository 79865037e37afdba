//! Rate limit domain - Daily fixed-window limits per client

mod config;

pub use config::{FailurePolicy, RateLimitConfig, RateLimitDecision};

/// Identifier used when the client address cannot be determined
pub const FALLBACK_IDENTIFIER: &str = "0.0.0.0";
