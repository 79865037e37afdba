//! In-memory store implementation
//!
//! Mirrors the sorted-set and counter semantics of the Redis store so the
//! service runs unchanged without remote credentials. State lives for the
//! lifetime of the process and is never persisted. Expired counters are
//! swept periodically, the way Redis drops keys once their TTL passes.

use std::collections::{BTreeSet, HashMap};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{DomainError, KeyValueStore};

/// Sorted set ordered by (score, member), like Redis
#[derive(Debug, Default)]
struct SortedSet {
    ordered: BTreeSet<(i64, String)>,
    scores: HashMap<String, i64>,
}

impl SortedSet {
    fn insert(&mut self, score: i64, member: &str) {
        if let Some(previous) = self.scores.insert(member.to_string(), score) {
            self.ordered.remove(&(previous, member.to_string()));
        }
        self.ordered.insert((score, member.to_string()));
    }

    fn remove(&mut self, member: &str) -> bool {
        match self.scores.remove(member) {
            Some(score) => self.ordered.remove(&(score, member.to_string())),
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Counter {
    value: i64,
    expires_at: Option<DateTime<Utc>>,
}

impl Counter {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Thread-safe in-process store
#[derive(Debug)]
pub struct InMemoryStore {
    sets: RwLock<HashMap<String, SortedSet>>,
    counters: RwLock<HashMap<String, Counter>>,
    /// Minimum time between expired-counter sweeps
    cleanup_interval: Duration,
    last_cleanup: RwLock<DateTime<Utc>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            sets: RwLock::default(),
            counters: RwLock::default(),
            cleanup_interval: DEFAULT_CLEANUP_INTERVAL,
            last_cleanup: RwLock::new(Utc::now()),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop expired counters once the cleanup interval has elapsed.
    ///
    /// Window keys are not touched again after their window closes.
    async fn maybe_cleanup(&self, counters: &mut HashMap<String, Counter>, now: DateTime<Utc>) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            (now - *last).to_std().unwrap_or_default() >= self.cleanup_interval
        };

        if should_cleanup {
            *self.last_cleanup.write().await = now;

            let before = counters.len();
            counters.retain(|_, counter| !counter.is_expired(now));

            let removed = before - counters.len();
            if removed > 0 {
                debug!(removed, remaining = counters.len(), "Swept expired counters");
            }
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn append(&self, set_key: &str, score: i64, member: &str) -> Result<(), DomainError> {
        let mut sets = self.sets.write().await;
        sets.entry(set_key.to_string())
            .or_default()
            .insert(score, member);
        Ok(())
    }

    async fn range_latest(&self, set_key: &str, count: usize) -> Result<Vec<String>, DomainError> {
        let sets = self.sets.read().await;

        Ok(sets
            .get(set_key)
            .map(|set| {
                set.ordered
                    .iter()
                    .rev()
                    .take(count)
                    .map(|(_, member)| member.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn range_all(&self, set_key: &str) -> Result<Vec<String>, DomainError> {
        let sets = self.sets.read().await;

        Ok(sets
            .get(set_key)
            .map(|set| set.ordered.iter().map(|(_, member)| member.clone()).collect())
            .unwrap_or_default())
    }

    async fn remove(&self, set_key: &str, member: &str) -> Result<bool, DomainError> {
        let mut sets = self.sets.write().await;

        Ok(sets
            .get_mut(set_key)
            .is_some_and(|set| set.remove(member)))
    }

    async fn increment(&self, counter_key: &str) -> Result<i64, DomainError> {
        let now = Utc::now();
        let mut counters = self.counters.write().await;
        self.maybe_cleanup(&mut counters, now).await;

        let counter = counters
            .entry(counter_key.to_string())
            .or_insert(Counter {
                value: 0,
                expires_at: None,
            });

        if counter.is_expired(now) {
            counter.value = 0;
            counter.expires_at = None;
        }

        counter.value += 1;
        Ok(counter.value)
    }

    async fn expire(&self, counter_key: &str, ttl: Duration) -> Result<bool, DomainError> {
        let now = Utc::now();
        let mut counters = self.counters.write().await;

        match counters.get_mut(counter_key) {
            Some(counter) if !counter.is_expired(now) => {
                let ttl = chrono::Duration::from_std(ttl)
                    .map_err(|e| DomainError::store(format!("Invalid TTL: {}", e)))?;
                counter.expires_at = Some(now + ttl);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn backend_name(&self) -> &'static str {
        "in_memory"
    }
}
