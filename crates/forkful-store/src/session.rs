//! TTL session store.
//!
//! A generic expiring key-value store for serialized authentication session
//! payloads, keyed by session id. It is independent of the entity model and
//! co-resides with the storage engine only for lifecycle convenience.
//!
//! Expiry is two-tier: `get` never returns an entry whose TTL has elapsed
//! (lazy expiry), and a background sweeper task removes expired entries on a
//! fixed interval (default 24 hours) so the map does not grow unbounded. The
//! sweeper is aborted when the store is dropped.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default sweep interval: prune expired entries every 24 hours.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
struct SessionEntry {
    value: Value,
    expires_at: Instant,
}

type SessionMap = Arc<RwLock<HashMap<String, SessionEntry>>>;

/// An expiring key-value store for session payloads.
///
/// Must be constructed inside a tokio runtime: the sweeper is spawned at
/// construction and lives until the store is dropped.
#[derive(Debug)]
pub struct SessionStore {
    entries: SessionMap,
    sweeper: JoinHandle<()>,
}

impl SessionStore {
    /// Create a session store with the default 24-hour sweep interval.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sweep_interval(DEFAULT_SWEEP_INTERVAL)
    }

    /// Create a session store that sweeps expired entries every `interval`.
    #[must_use]
    pub fn with_sweep_interval(interval: Duration) -> Self {
        let entries: SessionMap = Arc::new(RwLock::new(HashMap::new()));
        let sweeper = tokio::spawn(run_sweeper(Arc::clone(&entries), interval));
        Self { entries, sweeper }
    }

    /// Get a session payload by id.
    ///
    /// Returns `None` if the key is missing or its TTL has elapsed, even
    /// before the sweeper removes it.
    pub async fn get(&self, key: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.value.clone())
    }

    /// Insert or replace a session payload, restarting its TTL.
    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Duration) {
        let entry = SessionEntry {
            value,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.into(), entry);
    }

    /// Remove a session immediately.
    pub async fn destroy(&self, key: &str) {
        self.entries.write().await.remove(key);
    }

    /// Number of entries currently held, including expired ones the sweeper
    /// has not reached yet.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}

/// Periodically remove every entry whose TTL has elapsed.
async fn run_sweeper(entries: SessionMap, interval: Duration) {
    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; skip it so a fresh store does not
    // sweep before anything is inserted.
    ticker.tick().await;
    loop {
        ticker.tick().await;
        let now = Instant::now();
        entries.write().await.retain(|_, entry| entry.expires_at > now);
    }
}
