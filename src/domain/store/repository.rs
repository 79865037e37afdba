//! Key-value store trait definition

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::DomainError;

/// Sorted-set and counter operations over a key-value store
///
/// Members are plain strings compared by exact value: adding a member that
/// is already present only updates its score, and removal requires the
/// identical string that was inserted.
#[async_trait]
pub trait KeyValueStore: Send + Sync + Debug {
    /// Adds a member to a sorted set, replacing the score of an identical member
    async fn append(&self, set_key: &str, score: i64, member: &str) -> Result<(), DomainError>;

    /// Returns up to `count` members ordered by descending score
    async fn range_latest(&self, set_key: &str, count: usize) -> Result<Vec<String>, DomainError>;

    /// Returns every member ordered by ascending score
    async fn range_all(&self, set_key: &str) -> Result<Vec<String>, DomainError>;

    /// Removes a member by exact value, returning whether anything was removed
    async fn remove(&self, set_key: &str, member: &str) -> Result<bool, DomainError>;

    /// Increments a counter, returning the new value (missing counters start at 0)
    async fn increment(&self, counter_key: &str) -> Result<i64, DomainError>;

    /// Sets the time-to-live of an existing key
    async fn expire(&self, counter_key: &str, ttl: Duration) -> Result<bool, DomainError>;

    /// Short backend name used in logs and readiness checks
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock store for testing
    #[derive(Debug, Default)]
    pub struct MockStore {
        sets: Mutex<HashMap<String, Vec<(i64, String)>>>,
        counters: Mutex<HashMap<String, i64>>,
        error: Mutex<Option<String>>,
        increment_error: Mutex<Option<String>>,
    }

    impl MockStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds a raw member, bypassing any serialization done by callers
        pub fn with_member(self, set_key: &str, score: i64, member: &str) -> Self {
            self.sets
                .lock()
                .unwrap()
                .entry(set_key.to_string())
                .or_default()
                .push((score, member.to_string()));
            self
        }

        /// Fails every operation
        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.error.lock().unwrap() = Some(error.into());
            self
        }

        /// Fails only counter increments
        pub fn with_increment_error(self, error: impl Into<String>) -> Self {
            *self.increment_error.lock().unwrap() = Some(error.into());
            self
        }

        pub fn counter(&self, key: &str) -> Option<i64> {
            self.counters.lock().unwrap().get(key).copied()
        }

        pub fn len(&self, set_key: &str) -> usize {
            self.sets
                .lock()
                .unwrap()
                .get(set_key)
                .map_or(0, |members| members.len())
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(error) = self.error.lock().unwrap().clone() {
                return Err(DomainError::store(error));
            }
            Ok(())
        }

        fn sorted(&self, set_key: &str) -> Vec<(i64, String)> {
            let mut members = self
                .sets
                .lock()
                .unwrap()
                .get(set_key)
                .cloned()
                .unwrap_or_default();
            members.sort();
            members
        }
    }

    #[async_trait]
    impl KeyValueStore for MockStore {
        async fn append(&self, set_key: &str, score: i64, member: &str) -> Result<(), DomainError> {
            self.check_error()?;
            let mut sets = self.sets.lock().unwrap();
            let members = sets.entry(set_key.to_string()).or_default();
            members.retain(|(_, m)| m != member);
            members.push((score, member.to_string()));
            Ok(())
        }

        async fn range_latest(
            &self,
            set_key: &str,
            count: usize,
        ) -> Result<Vec<String>, DomainError> {
            self.check_error()?;
            Ok(self
                .sorted(set_key)
                .into_iter()
                .rev()
                .take(count)
                .map(|(_, m)| m)
                .collect())
        }

        async fn range_all(&self, set_key: &str) -> Result<Vec<String>, DomainError> {
            self.check_error()?;
            Ok(self.sorted(set_key).into_iter().map(|(_, m)| m).collect())
        }

        async fn remove(&self, set_key: &str, member: &str) -> Result<bool, DomainError> {
            self.check_error()?;
            let mut sets = self.sets.lock().unwrap();
            let Some(members) = sets.get_mut(set_key) else {
                return Ok(false);
            };
            let before = members.len();
            members.retain(|(_, m)| m != member);
            Ok(members.len() < before)
        }

        async fn increment(&self, counter_key: &str) -> Result<i64, DomainError> {
            self.check_error()?;
            if let Some(error) = self.increment_error.lock().unwrap().clone() {
                return Err(DomainError::store(error));
            }
            let mut counters = self.counters.lock().unwrap();
            let value = counters.entry(counter_key.to_string()).or_insert(0);
            *value += 1;
            Ok(*value)
        }

        async fn expire(&self, counter_key: &str, _ttl: Duration) -> Result<bool, DomainError> {
            self.check_error()?;
            Ok(self.counters.lock().unwrap().contains_key(counter_key))
        }

        fn backend_name(&self) -> &'static str {
            "mock"
        }
    }

    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_store_append_deduplicates() {
            let store = MockStore::new();
            store.append("set", 1, "a").await.unwrap();
            store.append("set", 2, "a").await.unwrap();

            assert_eq!(store.len("set"), 1);
        }

        #[tokio::test]
        async fn test_mock_store_with_error() {
            let store = MockStore::new().with_error("Test error");

            let result = store.range_all("set").await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_mock_store_increment() {
            let store = MockStore::new();

            assert_eq!(store.increment("counter").await.unwrap(), 1);
            assert_eq!(store.increment("counter").await.unwrap(), 2);
            assert_eq!(store.counter("counter"), Some(2));
        }
    }
}
