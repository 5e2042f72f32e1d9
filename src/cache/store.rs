//! External explanation store backends.
//!
//! The cache's durable tier is abstracted behind [`ExplanationStore`] so the
//! same cache logic runs against Redis in production and an in-memory map in
//! tests or single-process deployments. Payloads are JSON documents carrying
//! the explanation text and its generation timestamp.

use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// A cached explanation as persisted in the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedExplanation {
    /// The explanation text shown to students.
    pub explanation: String,
    /// When the text was generated.
    pub generated_at: DateTime<Utc>,
}

/// Durable tier behind the explanation cache.
#[async_trait]
pub trait ExplanationStore: Send + Sync {
    /// Short name of the backing store, for logs.
    fn backend(&self) -> &'static str;

    /// Fetch an entry by its storage key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the backend cannot be reached. A
    /// present but undecodable payload is treated as a miss, not an error.
    async fn get(&self, key: &str) -> Result<Option<CachedExplanation>>;

    /// Write an entry under its storage key, with an optional TTL.
    ///
    /// A TTL of zero removes any existing entry instead of storing one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the entry cannot be encoded and
    /// [`Error::Store`] when the backend rejects the write.
    async fn set(&self, key: &str, entry: &CachedExplanation, ttl_seconds: Option<u64>)
        -> Result<()>;
}

/// Redis-backed explanation store.
///
/// Holds a [`ConnectionManager`], which multiplexes and reconnects
/// internally; clones share the underlying connection.
#[derive(Clone)]
pub struct RedisExplanationStore {
    manager: ConnectionManager,
}

impl RedisExplanationStore {
    /// Connect to Redis at the given URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the URL is invalid or the initial
    /// connection cannot be established.
    pub async fn connect(url: &str) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| Error::Store(format!("invalid Redis URL: {e}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| Error::Store(format!("failed to connect to Redis: {e}")))?;
        debug!("Connected to Redis explanation store");
        Ok(Self { manager })
    }
}

#[async_trait]
impl ExplanationStore for RedisExplanationStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<CachedExplanation>> {
        let mut conn = self.manager.clone();
        let payload: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| Error::Store(format!("Redis GET failed: {e}")))?;
        match payload {
            Some(payload) => match serde_json::from_str(&payload) {
                Ok(entry) => Ok(Some(entry)),
                Err(e) => {
                    warn!("Discarding undecodable cache payload at {}: {}", key, e);
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        entry: &CachedExplanation,
        ttl_seconds: Option<u64>,
    ) -> Result<()> {
        let payload = serde_json::to_string(entry)
            .map_err(|e| Error::Serialization(format!("failed to encode cache entry: {e}")))?;
        let mut conn = self.manager.clone();
        // SETEX rejects a zero expiry, so a zero TTL drops the key instead
        let result: redis::RedisResult<()> = match ttl_seconds {
            Some(0) => conn.del(key).await,
            Some(ttl) => conn.set_ex(key, payload, ttl).await,
            None => conn.set(key, payload).await,
        };
        result.map_err(|e| Error::Store(format!("Redis write failed: {e}")))
    }
}

struct StoredEntry {
    entry: CachedExplanation,
    expires_at: Option<Instant>,
}

/// In-memory explanation store.
///
/// Serves as the durable tier when no Redis URL is configured, and as the
/// standard backend in tests.
#[derive(Default)]
pub struct MemoryExplanationStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryExplanationStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExplanationStore for MemoryExplanationStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<CachedExplanation>> {
        let mut entries = self.entries.write();
        let expired = entries
            .get(key)
            .is_some_and(|stored| stored.expires_at.is_some_and(|at| at <= Instant::now()));
        if expired {
            entries.remove(key);
            return Ok(None);
        }
        Ok(entries.get(key).map(|stored| stored.entry.clone()))
    }

    async fn set(
        &self,
        key: &str,
        entry: &CachedExplanation,
        ttl_seconds: Option<u64>,
    ) -> Result<()> {
        if ttl_seconds == Some(0) {
            self.entries.write().remove(key);
            return Ok(());
        }
        let expires_at = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        self.entries.write().insert(
            key.to_string(),
            StoredEntry {
                entry: entry.clone(),
                expires_at,
            },
        );
        Ok(())
    }
}
