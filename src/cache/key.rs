//! Cache key normalization.
//!
//! Explanation lookups arrive with user-influenced strings ("Past_Tense",
//! " ES ") that must land on the same cache entry as their canonical forms.
//! Normalization happens once at the cache boundary; everything behind it
//! works with [`NormalizedKey`] only.

use serde::{Deserialize, Serialize};

/// Fallback category when the requested one normalizes to nothing.
pub const DEFAULT_CATEGORY: &str = "vocabulary";
/// Fallback language when the requested one normalizes to nothing.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Fallback level when the requested one normalizes to nothing.
pub const DEFAULT_LEVEL: &str = "beginner";

/// A raw explanation lookup key, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationKey {
    /// Grammar topic, e.g. "past-tense".
    pub category: String,
    /// Language code, e.g. "es".
    pub language: String,
    /// Proficiency level, e.g. "beginner".
    pub level: String,
}

impl ExplanationKey {
    /// Creates a key from raw caller-supplied segments.
    #[must_use]
    pub fn new(
        category: impl Into<String>,
        language: impl Into<String>,
        level: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            language: language.into(),
            level: level.into(),
        }
    }

    /// Normalizes every segment, substituting defaults for empty ones.
    #[must_use]
    pub fn normalized(&self) -> NormalizedKey {
        NormalizedKey {
            category: normalize_segment(&self.category, DEFAULT_CATEGORY),
            language: normalize_segment(&self.language, DEFAULT_LANGUAGE),
            level: normalize_segment(&self.level, DEFAULT_LEVEL),
        }
    }
}

/// A fully normalized key. Two raw keys that normalize to the same
/// `NormalizedKey` share one cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedKey {
    /// Normalized grammar topic.
    pub category: String,
    /// Normalized language code.
    pub language: String,
    /// Normalized proficiency level.
    pub level: String,
}

impl NormalizedKey {
    /// Renders the key a storage backend indexes by.
    #[must_use]
    pub fn storage_key(&self, prefix: &str) -> String {
        format!(
            "{prefix}:{}:{}:{}",
            self.language, self.level, self.category
        )
    }
}

/// Lowercases, trims, and joins interior whitespace and underscores with
/// hyphens. Empty results fall back to the given default.
fn normalize_segment(raw: &str, fallback: &str) -> String {
    let normalized = raw
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if normalized.is_empty() {
        fallback.to_string()
    } else {
        normalized
    }
}
