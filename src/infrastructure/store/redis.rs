//! Redis store implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::domain::{DomainError, KeyValueStore};

/// Configuration for the Redis store
#[derive(Debug, Clone)]
pub struct RedisStoreConfig {
    /// Redis connection URL (e.g., "redis://127.0.0.1:6379")
    pub url: String,
    /// Connection timeout
    pub connection_timeout: Duration,
}

impl RedisStoreConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connection_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }
}

/// Redis-backed store
///
/// Sorted sets map to ZADD / ZRANGE / ZREM and counters to INCR / EXPIRE,
/// all through a shared `ConnectionManager`.
#[derive(Clone)]
pub struct RedisStore {
    connection: ConnectionManager,
}

impl fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisStore")
            .field("connection", &"<ConnectionManager>")
            .finish()
    }
}

impl RedisStore {
    /// Connects to Redis, failing if the connection is not up within the timeout
    pub async fn connect(config: &RedisStoreConfig) -> Result<Self, DomainError> {
        let client = Client::open(config.url.as_str())
            .map_err(|e| DomainError::store(format!("Failed to create Redis client: {}", e)))?;

        let connection = tokio::time::timeout(
            config.connection_timeout,
            ConnectionManager::new(client),
        )
        .await
        .map_err(|_| {
            DomainError::store(format!(
                "Timed out connecting to Redis after {:?}",
                config.connection_timeout
            ))
        })?
        .map_err(|e| DomainError::store(format!("Failed to connect to Redis: {}", e)))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn append(&self, set_key: &str, score: i64, member: &str) -> Result<(), DomainError> {
        let mut conn = self.connection.clone();

        let _: i64 = conn.zadd(set_key, member, score).await.map_err(|e| {
            DomainError::store(format!("Failed to add member to '{}': {}", set_key, e))
        })?;

        Ok(())
    }

    async fn range_latest(&self, set_key: &str, count: usize) -> Result<Vec<String>, DomainError> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self.connection.clone();
        let stop = count as isize - 1;

        conn.zrevrange(set_key, 0, stop).await.map_err(|e| {
            DomainError::store(format!("Failed to read latest members of '{}': {}", set_key, e))
        })
    }

    async fn range_all(&self, set_key: &str) -> Result<Vec<String>, DomainError> {
        let mut conn = self.connection.clone();

        conn.zrange(set_key, 0, -1).await.map_err(|e| {
            DomainError::store(format!("Failed to read members of '{}': {}", set_key, e))
        })
    }

    async fn remove(&self, set_key: &str, member: &str) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();

        let removed: i64 = conn.zrem(set_key, member).await.map_err(|e| {
            DomainError::store(format!("Failed to remove member from '{}': {}", set_key, e))
        })?;

        Ok(removed > 0)
    }

    async fn increment(&self, counter_key: &str) -> Result<i64, DomainError> {
        let mut conn = self.connection.clone();

        conn.incr(counter_key, 1i64).await.map_err(|e| {
            DomainError::store(format!("Failed to increment '{}': {}", counter_key, e))
        })
    }

    async fn expire(&self, counter_key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let mut conn = self.connection.clone();
        let ttl_secs = ttl.as_secs().max(1) as i64;

        conn.expire(counter_key, ttl_secs).await.map_err(|e| {
            DomainError::store(format!("Failed to set TTL for '{}': {}", counter_key, e))
        })
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests require a running Redis instance
    // Run with: cargo test -- --ignored

    async fn connect() -> RedisStore {
        RedisStore::connect(&RedisStoreConfig::new("redis://127.0.0.1:6379"))
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_sorted_set_roundtrip() {
        let store = connect().await;
        let key = format!("test:gallery:{}", uuid::Uuid::new_v4());

        store.append(&key, 1, "old").await.unwrap();
        store.append(&key, 2, "new").await.unwrap();

        assert_eq!(store.range_latest(&key, 1).await.unwrap(), vec!["new"]);
        assert_eq!(store.range_all(&key).await.unwrap(), vec!["old", "new"]);

        assert!(store.remove(&key, "old").await.unwrap());
        assert!(store.remove(&key, "new").await.unwrap());
    }

    #[tokio::test]
    #[ignore = "Requires running Redis instance"]
    async fn test_redis_increment_and_expire() {
        let store = connect().await;
        let key = format!("test:counter:{}", uuid::Uuid::new_v4());

        assert_eq!(store.increment(&key).await.unwrap(), 1);
        assert_eq!(store.increment(&key).await.unwrap(), 2);
        assert!(store.expire(&key, Duration::from_secs(5)).await.unwrap());
    }

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisStore::connect(&RedisStoreConfig::new("not-a-url")).await;
        assert!(result.is_err());
    }
}
