//! Two-tier grammar explanation cache.
//!
//! Lookups consult a bounded in-process tier first, then the external
//! store; external hits are promoted into the local tier on the way back.
//! Writes land in the external store first so a storage failure never
//! leaves the local tier ahead of it.

use crate::cache::key::{ExplanationKey, NormalizedKey};
use crate::cache::local::LocalTier;
use crate::cache::metrics::{CacheMetrics, CacheStats};
use crate::cache::store::{CachedExplanation, ExplanationStore, RedisExplanationStore};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info};

/// Configuration for the explanation cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationCacheConfig {
    /// Maximum entries held in the in-process tier.
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// TTL applied to writes that do not specify one, in seconds.
    #[serde(default = "default_ttl_seconds")]
    pub default_ttl_seconds: u64,
    /// Prefix for storage keys.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    /// Redis connection URL; unset means the in-memory backend.
    #[serde(default)]
    pub redis_url: Option<String>,
}

const fn default_max_entries() -> usize {
    256
}

/// 30 days.
const fn default_ttl_seconds() -> u64 {
    2_592_000
}

fn default_key_prefix() -> String {
    "grammar_explanation".to_string()
}

impl Default for ExplanationCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            default_ttl_seconds: default_ttl_seconds(),
            key_prefix: default_key_prefix(),
            redis_url: None,
        }
    }
}

/// Which tier answered a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    /// Served from the in-process tier.
    Local,
    /// Served from the external store.
    External,
    /// Produced by the generator on a miss.
    Generated,
}

/// A cache answer together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExplanation {
    /// The cached entry.
    pub entry: CachedExplanation,
    /// The tier that answered.
    pub source: LookupSource,
}

/// Optional knobs for a cache write.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// TTL override; `None` uses the configured default.
    pub ttl_seconds: Option<u64>,
    /// Generation timestamp override; `None` uses the current time.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Two-tier cache for generated grammar explanations.
///
/// Generating an explanation is expensive, so results are kept in a small
/// in-process tier backed by a durable store. The cache normalizes keys at
/// the boundary; equivalent spellings of a topic share one entry.
pub struct ExplanationCache<S: ExplanationStore> {
    local: Mutex<LocalTier>,
    store: S,
    config: ExplanationCacheConfig,
    metrics: CacheMetrics,
}

impl<S: ExplanationStore> ExplanationCache<S> {
    /// Create a cache over the given store.
    pub fn new(store: S, config: ExplanationCacheConfig) -> Self {
        info!(
            "Explanation cache initialized (backend={}, max_entries={}, default_ttl={}s)",
            store.backend(),
            config.max_entries,
            config.default_ttl_seconds
        );
        Self {
            local: Mutex::new(LocalTier::new(config.max_entries)),
            store,
            config,
            metrics: CacheMetrics::new(),
        }
    }

    /// Look up an explanation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] if the external store cannot be reached.
    pub async fn get(&self, key: &ExplanationKey) -> Result<Option<CachedExplanation>> {
        let storage_key = key.normalized().storage_key(&self.config.key_prefix);
        let resolved = self.lookup(&storage_key).await?;
        Ok(resolved.map(|(entry, _)| entry))
    }

    /// Store an explanation, returning the entry as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the entry cannot be encoded and
    /// [`Error::Store`] if the external store rejects the write.
    pub async fn insert(
        &self,
        key: &ExplanationKey,
        explanation: impl Into<String>,
        options: WriteOptions,
    ) -> Result<CachedExplanation> {
        let storage_key = key.normalized().storage_key(&self.config.key_prefix);
        self.write(storage_key, explanation.into(), options).await
    }

    /// Look up an explanation, invoking `generate` on a miss.
    ///
    /// The generator runs at most once per call and receives the normalized
    /// key it is producing for. Its output is cached before being returned.
    ///
    /// # Errors
    ///
    /// Propagates generator failures and any [`Error::Store`] or
    /// [`Error::Serialization`] from the tiers.
    pub async fn get_or_generate<F, Fut>(
        &self,
        key: &ExplanationKey,
        ttl_seconds: Option<u64>,
        generate: F,
    ) -> Result<ResolvedExplanation>
    where
        F: FnOnce(NormalizedKey) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let normalized = key.normalized();
        let storage_key = normalized.storage_key(&self.config.key_prefix);
        if let Some((entry, source)) = self.lookup(&storage_key).await? {
            return Ok(ResolvedExplanation { entry, source });
        }

        let explanation = generate(normalized).await?;
        self.metrics.record_generation();
        debug!("Generated explanation for {}", storage_key);

        let entry = self
            .write(
                storage_key,
                explanation,
                WriteOptions {
                    ttl_seconds,
                    generated_at: None,
                },
            )
            .await?;
        Ok(ResolvedExplanation {
            entry,
            source: LookupSource::Generated,
        })
    }

    /// Pre-populate the cache with a stock explanation for the key.
    ///
    /// Used at startup to seed high-traffic topics. Warming an already
    /// cached key leaves the existing entry in place.
    ///
    /// # Errors
    ///
    /// Propagates the same failures as [`Self::get_or_generate`].
    pub async fn warm(
        &self,
        key: &ExplanationKey,
        ttl_seconds: Option<u64>,
    ) -> Result<ResolvedExplanation> {
        self.get_or_generate(key, ttl_seconds, |normalized| async move {
            Ok(default_explanation(&normalized))
        })
        .await
    }

    /// Number of entries resident in the in-process tier.
    #[must_use]
    pub fn len(&self) -> usize {
        self.local.lock().len()
    }

    /// True if the in-process tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Approximate bytes resident in the in-process tier.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.local.lock().total_bytes()
    }

    /// Snapshot of the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot()
    }

    /// Short name of the external backend.
    #[must_use]
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Consult both tiers, promoting external hits into the local tier.
    async fn lookup(&self, storage_key: &str) -> Result<Option<(CachedExplanation, LookupSource)>> {
        let now = Utc::now();

        let local_hit = self.local.lock().get(storage_key, now);
        if let Some(entry) = local_hit {
            self.metrics.record_local_hit();
            debug!("Local cache hit for {}", storage_key);
            return Ok(Some((entry, LookupSource::Local)));
        }

        if let Some(entry) = self.store.get(storage_key).await? {
            self.metrics.record_external_hit();
            debug!("External cache hit for {}, promoting", storage_key);
            let expires_at = local_expiry(now, self.config.default_ttl_seconds);
            self.local
                .lock()
                .insert(storage_key.to_string(), entry.clone(), expires_at, now);
            return Ok(Some((entry, LookupSource::External)));
        }

        self.metrics.record_miss();
        Ok(None)
    }

    /// Write to the external store, then mirror into the local tier.
    async fn write(
        &self,
        storage_key: String,
        explanation: String,
        options: WriteOptions,
    ) -> Result<CachedExplanation> {
        let now = Utc::now();
        let entry = CachedExplanation {
            explanation,
            generated_at: options.generated_at.unwrap_or(now),
        };
        let ttl = options.ttl_seconds.unwrap_or(self.config.default_ttl_seconds);

        self.store.set(&storage_key, &entry, Some(ttl)).await?;

        let expires_at = local_expiry(now, ttl);
        self.local
            .lock()
            .insert(storage_key, entry.clone(), expires_at, now);
        Ok(entry)
    }
}

impl ExplanationCache<RedisExplanationStore> {
    /// Connect a Redis-backed cache using `config.redis_url`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if no Redis URL is configured and
    /// [`Error::Store`] if the connection cannot be established.
    pub async fn connect(config: ExplanationCacheConfig) -> Result<Self> {
        let url = config.redis_url.clone().ok_or_else(|| {
            Error::Config("cache.redis_url must be set to use the Redis backend".to_string())
        })?;
        let store = RedisExplanationStore::connect(&url).await?;
        Ok(Self::new(store, config))
    }
}

/// Local-tier expiry instant for a TTL, `None` if it overflows the calendar.
fn local_expiry(now: DateTime<Utc>, ttl_seconds: u64) -> Option<DateTime<Utc>> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| now.checked_add_signed(ttl))
}

/// Stock explanation used by [`ExplanationCache::warm`].
fn default_explanation(key: &NormalizedKey) -> String {
    let topic = key.category.replace('-', " ");
    let level = key.level.replace('-', " ");
    let language = language_label(&key.language);
    let hint = match key.level.as_str() {
        "beginner" => "Start with the basics and simple examples.",
        "intermediate" => "Build on the fundamentals and watch for common exceptions.",
        "advanced" => "Focus on nuance, register, and irregular cases.",
        _ => "Work through the examples at your own pace.",
    };
    format!("An overview of {topic} for {level} learners of {language}. {hint}")
}

/// Human-readable label for a normalized language code.
fn language_label(code: &str) -> String {
    match code {
        "en" => "English".to_string(),
        "es" => "Spanish".to_string(),
        "fr" => "French".to_string(),
        "de" => "German".to_string(),
        "it" => "Italian".to_string(),
        "pt" => "Portuguese".to_string(),
        "ja" => "Japanese".to_string(),
        "zh" => "Chinese".to_string(),
        "ko" => "Korean".to_string(),
        "ru" => "Russian".to_string(),
        other => other.to_uppercase(),
    }
}
