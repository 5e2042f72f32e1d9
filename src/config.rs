//! Configuration for tutorlane-core.

use crate::booking::AdvanceWindowPolicy;
use crate::cache::ExplanationCacheConfig;
use crate::payments::{ApplicationFeePolicy, PricingLimits};
use serde::{Deserialize, Serialize};

/// Booking validation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    /// Advance-window bounds applied to new bookings.
    #[serde(default)]
    pub advance_window: AdvanceWindowPolicy,

    /// Buffer between sessions for tutors who have not set one, in minutes.
    #[serde(default)]
    pub default_buffer_minutes: u32,
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Platform fee taken from each session payment.
    #[serde(default)]
    pub fee_policy: ApplicationFeePolicy,

    /// Bounds on chargeable prices.
    #[serde(default)]
    pub pricing: PricingLimits,

    /// Booking validation settings.
    #[serde(default)]
    pub booking: BookingConfig,

    /// Explanation cache settings.
    #[serde(default)]
    pub cache: ExplanationCacheConfig,

    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            fee_policy: ApplicationFeePolicy::default(),
            pricing: PricingLimits::default(),
            booking: BookingConfig::default(),
            cache: ExplanationCacheConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn to_file(&self, path: &std::path::Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
