//! Cache effectiveness counters.
//!
//! Tracks hits, misses, and generation counts so operators can see whether
//! the explanation cache is actually saving generation work. Counters only
//! ever increase; [`CacheMetrics::snapshot`] renders a point-in-time view.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters for explanation cache activity.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    /// Lookups answered from either tier.
    hits: AtomicU64,
    /// Lookups answered by neither tier.
    misses: AtomicU64,
    /// Hits served by the in-process tier.
    local_hits: AtomicU64,
    /// Hits served by the external store.
    external_hits: AtomicU64,
    /// Entries produced by a generator or warm-up.
    generated: AtomicU64,
}

impl CacheMetrics {
    /// Create a zeroed metrics block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a lookup served by the in-process tier.
    pub fn record_local_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.local_hits.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a lookup served by the external store.
    pub fn record_external_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.external_hits.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a lookup neither tier could answer.
    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a freshly generated or warmed entry.
    pub fn record_generation(&self) {
        self.generated.fetch_add(1, Ordering::SeqCst);
    }

    /// Get a point-in-time view of the counters.
    #[must_use]
    pub fn snapshot(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::SeqCst);
        let misses = self.misses.load(Ordering::SeqCst);
        let lookups = hits + misses;
        #[allow(clippy::cast_precision_loss)]
        let hit_ratio = if lookups == 0 {
            0.0
        } else {
            hits as f64 / lookups as f64
        };
        CacheStats {
            hits,
            misses,
            local_hits: self.local_hits.load(Ordering::SeqCst),
            external_hits: self.external_hits.load(Ordering::SeqCst),
            generated: self.generated.load(Ordering::SeqCst),
            hit_ratio,
        }
    }
}

/// Point-in-time cache statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheStats {
    /// Lookups answered from either tier.
    pub hits: u64,
    /// Lookups answered by neither tier.
    pub misses: u64,
    /// Hits served by the in-process tier.
    pub local_hits: u64,
    /// Hits served by the external store.
    pub external_hits: u64,
    /// Entries produced by a generator or warm-up.
    pub generated: u64,
    /// Hits divided by total lookups, 0.0 before any lookup.
    pub hit_ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_metrics_are_zero() {
        let metrics = CacheMetrics::new();
        let stats = metrics.snapshot();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.generated, 0);
        assert!((stats.hit_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hits_split_by_tier() {
        let metrics = CacheMetrics::new();
        metrics.record_local_hit();
        metrics.record_local_hit();
        metrics.record_external_hit();

        let stats = metrics.snapshot();
        assert_eq!(stats.hits, 3);
        assert_eq!(stats.local_hits, 2);
        assert_eq!(stats.external_hits, 1);
    }

    #[test]
    fn test_hit_ratio() {
        let metrics = CacheMetrics::new();
        metrics.record_local_hit();
        metrics.record_external_hit();
        metrics.record_miss();
        metrics.record_miss();

        let stats = metrics.snapshot();
        assert_eq!(stats.misses, 2);
        assert!((stats.hit_ratio - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_generation_does_not_affect_ratio() {
        let metrics = CacheMetrics::new();
        metrics.record_miss();
        metrics.record_generation();

        let stats = metrics.snapshot();
        assert_eq!(stats.generated, 1);
        assert!((stats.hit_ratio - 0.0).abs() < f64::EPSILON);
    }
}
