//! Marketplace application-fee computation.
//!
//! Splits a gross charge amount into the platform's application fee and the
//! net payout to the tutor, according to the configured fee policy. All
//! amounts are integer cents.

use serde::{Deserialize, Serialize};

/// How the platform's application fee is derived from a gross amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ApplicationFeePolicy {
    /// Fixed fee in cents, independent of the gross amount.
    Flat {
        /// Fee in cents.
        amount_cents: i64,
    },
    /// Percentage of the gross amount, with an optional floor.
    Percent {
        /// Percentage of the gross amount (e.g. `1.0` for 1%).
        percent: f64,
        /// Minimum fee in cents once any fee applies.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_fee_cents: Option<i64>,
    },
}

impl Default for ApplicationFeePolicy {
    /// The platform default: a 1% application fee with no minimum.
    fn default() -> Self {
        Self::Percent {
            percent: 1.0,
            min_fee_cents: None,
        }
    }
}

/// Split of a gross amount into application fee and tutor payout.
///
/// Invariant: `application_fee_cents + net_to_tutor_cents` equals the gross
/// amount the split was computed from, and both parts are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// The platform's cut, in cents.
    pub application_fee_cents: i64,
    /// What the tutor receives, in cents.
    pub net_to_tutor_cents: i64,
}

/// Compute the application fee and net payout for a gross amount.
///
/// Flat policies charge `amount_cents` outright; percent policies round the
/// percentage half-away-from-zero and then apply the minimum fee if one is
/// set. The fee is clamped to the gross amount so the breakdown always sums
/// back to it, even under a policy that exceeds the charge. Negative inputs
/// are treated as zero.
///
/// # Arguments
///
/// * `gross_amount_cents` - The full amount charged to the student
/// * `policy` - The fee policy to apply
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn compute_application_fee(
    gross_amount_cents: i64,
    policy: &ApplicationFeePolicy,
) -> FeeBreakdown {
    let gross = gross_amount_cents.max(0);

    let fee = match policy {
        ApplicationFeePolicy::Flat { amount_cents } => (*amount_cents).max(0),
        ApplicationFeePolicy::Percent {
            percent,
            min_fee_cents,
        } => {
            let computed = (gross as f64 * percent.max(0.0) / 100.0).round() as i64;
            min_fee_cents.map_or(computed, |min| computed.max(min.max(0)))
        }
    };

    let fee = fee.min(gross);

    FeeBreakdown {
        application_fee_cents: fee,
        net_to_tutor_cents: gross - fee,
    }
}
