//! Connected payment-account status extraction.
//!
//! Normalizes the raw account record returned by the payment provider into
//! the snapshot the rest of the platform works with. The raw record is
//! untyped and frequently partial, so every field degrades to a safe
//! default rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Whether a connected account can currently accept charges and payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStatus {
    /// Onboarding started but the account is not fully enabled yet.
    #[default]
    Pending,
    /// Both charges and payouts are enabled.
    Completed,
    /// The provider has disabled the account and reported a reason.
    Restricted,
}

impl OnboardingStatus {
    /// Returns true if onboarding finished and the account is fully enabled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Normalized snapshot of a tutor's connected payment account.
///
/// Derived, never stored: recomputed on every status check from the
/// provider's live record and stamped with the extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorAccountStatus {
    /// Provider-side account identifier, if the account exists.
    pub account_id: Option<String>,
    /// Whether the account can accept charges.
    pub charges_enabled: bool,
    /// Whether the account can receive payouts.
    pub payouts_enabled: bool,
    /// Derived onboarding state.
    pub onboarding_status: OnboardingStatus,
    /// Default settlement currency, as reported by the provider.
    pub default_currency: Option<String>,
    /// Account country code.
    pub country: Option<String>,
    /// Whether the tutor submitted all onboarding details.
    pub details_submitted: bool,
    /// Provider's reason for disabling the account, when disabled.
    pub disabled_reason: Option<String>,
    /// Requirements that must be provided now.
    pub currently_due: Option<Vec<String>>,
    /// Requirements that will eventually be needed.
    pub eventually_due: Option<Vec<String>>,
    /// Requirements that are overdue.
    pub past_due: Option<Vec<String>>,
    /// Requirements the provider is currently verifying.
    pub pending_verification: Option<Vec<String>>,
    /// When this snapshot was extracted.
    pub checked_at: DateTime<Utc>,
}

impl TutorAccountStatus {
    /// Returns true if the account can take a destination charge right now.
    #[must_use]
    pub fn is_charge_ready(&self) -> bool {
        self.account_id.is_some() && self.charges_enabled
    }
}

/// Extract a normalized account status from a raw provider record.
///
/// Total mapping: any JSON input is accepted, including `{}` or non-object
/// values, with absent or wrongly typed fields reading as `false`/`None`.
/// Onboarding is `Completed` when both enabled flags are true, `Restricted`
/// when the provider reports a disabled reason, and `Pending` otherwise.
#[must_use]
pub fn extract_account_status(raw: &Value) -> TutorAccountStatus {
    let requirements = raw.get("requirements");

    let charges_enabled = bool_field(raw, "charges_enabled");
    let payouts_enabled = bool_field(raw, "payouts_enabled");
    let disabled_reason = requirements
        .and_then(|r| r.get("disabled_reason"))
        .and_then(Value::as_str)
        .map(str::to_owned);

    let onboarding_status = if charges_enabled && payouts_enabled {
        OnboardingStatus::Completed
    } else if disabled_reason.is_some() {
        OnboardingStatus::Restricted
    } else {
        OnboardingStatus::Pending
    };

    TutorAccountStatus {
        account_id: string_field(raw, "id"),
        charges_enabled,
        payouts_enabled,
        onboarding_status,
        default_currency: string_field(raw, "default_currency"),
        country: string_field(raw, "country"),
        details_submitted: bool_field(raw, "details_submitted"),
        disabled_reason,
        currently_due: string_list(requirements, "currently_due"),
        eventually_due: string_list(requirements, "eventually_due"),
        past_due: string_list(requirements, "past_due"),
        pending_verification: string_list(requirements, "pending_verification"),
        checked_at: Utc::now(),
    }
}

fn bool_field(raw: &Value, name: &str) -> bool {
    raw.get(name).and_then(Value::as_bool).unwrap_or(false)
}

fn string_field(raw: &Value, name: &str) -> Option<String> {
    raw.get(name).and_then(Value::as_str).map(str::to_owned)
}

/// Read a list of strings from the nested requirements object.
///
/// Non-string items are dropped rather than failing the whole list.
fn string_list(requirements: Option<&Value>, name: &str) -> Option<Vec<String>> {
    requirements
        .and_then(|r| r.get(name))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
}
