//! Bounded in-process cache tier.
//!
//! Holds the most recently used explanations in insertion order. When the
//! tier is full the entry at the front (least recently touched) is evicted;
//! reads move an entry to the back so hot entries outlive cold ones.
//! Expired entries are swept lazily on every access.

use crate::cache::store::CachedExplanation;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// One cached explanation plus its local bookkeeping.
#[derive(Debug, Clone)]
struct LocalEntry {
    entry: CachedExplanation,
    expires_at: Option<DateTime<Utc>>,
    bytes: usize,
}

/// Insertion-ordered bounded tier with lazy expiry.
#[derive(Debug)]
pub(crate) struct LocalTier {
    entries: IndexMap<String, LocalEntry>,
    max_entries: usize,
    total_bytes: usize,
}

impl LocalTier {
    /// Create an empty tier holding at most `max_entries` entries.
    pub(crate) fn new(max_entries: usize) -> Self {
        Self {
            entries: IndexMap::new(),
            max_entries,
            total_bytes: 0,
        }
    }

    /// Look up an entry, promoting it to the back on a hit.
    pub(crate) fn get(&mut self, key: &str, now: DateTime<Utc>) -> Option<CachedExplanation> {
        self.sweep(now);
        let hit = self.entries.shift_remove(key)?;
        let entry = hit.entry.clone();
        self.entries.insert(key.to_string(), hit);
        Some(entry)
    }

    /// Insert or replace an entry, evicting from the front if over capacity.
    pub(crate) fn insert(
        &mut self,
        key: String,
        entry: CachedExplanation,
        expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) {
        self.sweep(now);
        if let Some(replaced) = self.entries.shift_remove(&key) {
            self.total_bytes = self.total_bytes.saturating_sub(replaced.bytes);
        }
        let bytes = entry_size(&entry);
        self.entries.insert(
            key,
            LocalEntry {
                entry,
                expires_at,
                bytes,
            },
        );
        self.total_bytes += bytes;
        while self.entries.len() > self.max_entries {
            if let Some((_, evicted)) = self.entries.shift_remove_index(0) {
                self.total_bytes = self.total_bytes.saturating_sub(evicted.bytes);
            }
        }
    }

    /// Number of live entries (ignoring any not yet swept).
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Approximate resident size of the tier in bytes.
    pub(crate) fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    /// Drop every entry whose expiry has passed.
    fn sweep(&mut self, now: DateTime<Utc>) {
        let mut freed = 0usize;
        self.entries.retain(|_, entry| {
            let live = entry.expires_at.is_none_or(|at| at > now);
            if !live {
                freed += entry.bytes;
            }
            live
        });
        self.total_bytes = self.total_bytes.saturating_sub(freed);
    }
}

/// Serialized size of an entry, used for byte accounting.
fn entry_size(entry: &CachedExplanation) -> usize {
    serde_json::to_string(entry).map_or(entry.explanation.len(), |payload| payload.len())
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 3, 12, 0, 0)
            .single()
            .expect("valid time")
    }

    fn explanation(text: &str) -> CachedExplanation {
        CachedExplanation {
            explanation: text.to_string(),
            generated_at: now(),
        }
    }

    #[test]
    fn test_oldest_entry_evicted_at_capacity() {
        let mut tier = LocalTier::new(2);
        tier.insert("a".to_string(), explanation("first"), None, now());
        tier.insert("b".to_string(), explanation("second"), None, now());
        tier.insert("c".to_string(), explanation("third"), None, now());

        assert_eq!(tier.len(), 2);
        assert!(tier.get("a", now()).is_none());
        assert!(tier.get("b", now()).is_some());
        assert!(tier.get("c", now()).is_some());
    }

    #[test]
    fn test_read_promotion_changes_eviction_victim() {
        let mut tier = LocalTier::new(2);
        tier.insert("b".to_string(), explanation("second"), None, now());
        tier.insert("c".to_string(), explanation("third"), None, now());

        // Touch b so c becomes the oldest, then push both over capacity
        assert!(tier.get("b", now()).is_some());
        tier.insert("d".to_string(), explanation("fourth"), None, now());

        assert!(tier.get("c", now()).is_none());
        assert!(tier.get("b", now()).is_some());
        assert!(tier.get("d", now()).is_some());
    }

    #[test]
    fn test_expired_entries_swept_on_access() {
        let mut tier = LocalTier::new(4);
        tier.insert("a".to_string(), explanation("short"), Some(now()), now());
        assert_eq!(tier.len(), 1);

        // Expiry at `now` means the entry is already dead at `now`
        assert!(tier.get("a", now()).is_none());
        assert_eq!(tier.len(), 0);
        assert_eq!(tier.total_bytes(), 0);
    }

    #[test]
    fn test_byte_accounting_tracks_replacements() {
        let mut tier = LocalTier::new(4);
        let first = explanation("short");
        let second = explanation("a considerably longer explanation body");
        let second_bytes = serde_json::to_string(&second).expect("serialize").len();

        tier.insert("a".to_string(), first, None, now());
        tier.insert("a".to_string(), second, None, now());

        assert_eq!(tier.len(), 1);
        assert_eq!(tier.total_bytes(), second_bytes);
    }

    #[test]
    fn test_unexpired_entries_survive_sweep() {
        let mut tier = LocalTier::new(4);
        let later = now() + chrono::Duration::hours(1);
        tier.insert("a".to_string(), explanation("kept"), Some(later), now());
        assert!(tier.get("a", now()).is_some());
        assert_eq!(tier.len(), 1);
    }
}
