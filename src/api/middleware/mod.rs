//! API middleware components

pub mod client_ip;
pub mod geo_block;
pub mod logging;

pub use client_ip::client_identifier;
pub use geo_block::geo_block_middleware;
pub use logging::logging_middleware;
