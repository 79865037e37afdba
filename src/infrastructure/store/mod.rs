//! Store infrastructure - Key-value store implementations

mod factory;
mod in_memory;
mod redis;

pub use factory::{StoreConfig, StoreFactory};
pub use in_memory::InMemoryStore;
pub use redis::{RedisStore, RedisStoreConfig};
