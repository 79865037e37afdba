//! Image provider implementations

mod together;

pub use together::TogetherImageClient;
