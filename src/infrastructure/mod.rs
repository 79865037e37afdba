//! Infrastructure layer - External service implementations

pub mod image;
pub mod logging;
pub mod rate_limit;
pub mod services;
pub mod store;
