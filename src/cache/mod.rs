//! Grammar explanation caching.
//!
//! Generated explanations are cached in two tiers so repeat lookups skip
//! the expensive generation step:
//!
//! ```text
//!   lookup ──▶ normalize key ──▶ local tier ──hit──▶ answer (local)
//!                                   │ miss
//!                                   ▼
//!                             external store ──hit──▶ promote ──▶ answer (external)
//!                                   │ miss
//!                                   ▼
//!                               generator ──▶ write both tiers ──▶ answer (generated)
//! ```
//!
//! The local tier is a bounded insertion-ordered map; the external store is
//! Redis in production and an in-memory map otherwise. Keys are normalized
//! once at the boundary so "Past_Tense" and "past-tense" share an entry.

mod explanations;
mod key;
mod local;
mod metrics;
pub mod store;

pub use explanations::{
    ExplanationCache, ExplanationCacheConfig, LookupSource, ResolvedExplanation, WriteOptions,
};
pub use key::{ExplanationKey, NormalizedKey, DEFAULT_CATEGORY, DEFAULT_LANGUAGE, DEFAULT_LEVEL};
pub use metrics::{CacheMetrics, CacheStats};
pub use store::{
    CachedExplanation, ExplanationStore, MemoryExplanationStore, RedisExplanationStore,
};
