//! Service pricing validation.
//!
//! Checks that a requested charge matches the service the tutor actually
//! listed and sits inside the platform's chargeable bounds, so a tampered
//! client cannot pay a different amount than the listed price.

use serde::{Deserialize, Serialize};

/// Pricing fields of a listed tutoring service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePricing {
    /// Listed price in cents.
    pub price_cents: i64,
    /// Listed currency code (e.g. "usd").
    pub currency: String,
    /// Listed session length in minutes.
    pub duration_minutes: u32,
}

/// The pricing a charge request claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Amount the caller wants to charge, in cents.
    pub amount_cents: i64,
    /// Currency the caller wants to charge in.
    pub currency: String,
    /// Session length the caller claims, in minutes.
    pub duration_minutes: u32,
}

/// Platform-wide bounds on chargeable prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingLimits {
    /// Smallest chargeable price in cents.
    #[serde(default = "default_min_amount")]
    pub min_amount_cents: i64,

    /// Largest chargeable price in cents.
    #[serde(default = "default_max_amount")]
    pub max_amount_cents: i64,

    /// Currency codes the platform can settle.
    #[serde(default = "default_supported_currencies")]
    pub supported_currencies: Vec<String>,
}

impl Default for PricingLimits {
    fn default() -> Self {
        Self {
            min_amount_cents: default_min_amount(),
            max_amount_cents: default_max_amount(),
            supported_currencies: default_supported_currencies(),
        }
    }
}

const fn default_min_amount() -> i64 {
    100
}

const fn default_max_amount() -> i64 {
    1_000_000
}

fn default_supported_currencies() -> Vec<String> {
    ["usd", "eur", "gbp", "cad", "aud", "jpy", "mxn", "brl"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Outcome of validating a charge request against the listed service.
///
/// On success `price_cents` and `currency` carry the normalized pricing to
/// charge (currency lowercased); on failure they echo the listed service so
/// callers can display the expected values next to the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingCheck {
    /// True when the request matches the listed service and bounds.
    pub is_valid: bool,
    /// Price in cents to charge (the listed price).
    pub price_cents: i64,
    /// Normalized currency code.
    pub currency: String,
    /// Why the request was rejected, when it was.
    pub message: Option<String>,
}

impl PricingCheck {
    fn valid(price_cents: i64, currency: String) -> Self {
        Self {
            is_valid: true,
            price_cents,
            currency,
            message: None,
        }
    }

    fn rejected(service: &ServicePricing, message: String) -> Self {
        Self {
            is_valid: false,
            price_cents: service.price_cents,
            currency: service.currency.to_lowercase(),
            message: Some(message),
        }
    }
}

/// Validate a charge request against the listed service pricing.
///
/// The requested amount, currency (case-insensitive), and duration must all
/// equal the listed values, the currency must be supported, and the listed
/// price must sit inside the platform bounds. The first failed rule is
/// reported. Pure; never errors.
#[must_use]
pub fn validate_service_pricing(
    service: &ServicePricing,
    request: &PricingRequest,
    limits: &PricingLimits,
) -> PricingCheck {
    let currency = service.currency.to_lowercase();

    if request.amount_cents != service.price_cents {
        return PricingCheck::rejected(
            service,
            "The requested amount does not match the listed service price.".to_string(),
        );
    }

    if request.currency.to_lowercase() != currency {
        return PricingCheck::rejected(
            service,
            "The requested currency does not match the service currency.".to_string(),
        );
    }

    if !limits
        .supported_currencies
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(&currency))
    {
        return PricingCheck::rejected(
            service,
            format!("The currency \"{currency}\" is not supported for payments."),
        );
    }

    if request.duration_minutes != service.duration_minutes {
        return PricingCheck::rejected(
            service,
            "The requested duration does not match the service duration.".to_string(),
        );
    }

    if service.price_cents < limits.min_amount_cents {
        return PricingCheck::rejected(
            service,
            format!(
                "The service price is below the minimum chargeable amount of {} cents.",
                limits.min_amount_cents
            ),
        );
    }

    if service.price_cents > limits.max_amount_cents {
        return PricingCheck::rejected(
            service,
            format!(
                "The service price is above the maximum chargeable amount of {} cents.",
                limits.max_amount_cents
            ),
        );
    }

    PricingCheck::valid(service.price_cents, currency)
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    fn service() -> ServicePricing {
        ServicePricing {
            price_cents: 5000,
            currency: "USD".to_string(),
            duration_minutes: 60,
        }
    }

    fn matching_request() -> PricingRequest {
        PricingRequest {
            amount_cents: 5000,
            currency: "usd".to_string(),
            duration_minutes: 60,
        }
    }

    #[test]
    fn test_exact_match_passes_and_normalizes() {
        let check = validate_service_pricing(&service(), &matching_request(), &PricingLimits::default());
        assert!(check.is_valid);
        assert_eq!(check.price_cents, 5000);
        assert_eq!(check.currency, "usd");
        assert_eq!(check.message, None);
    }

    #[test]
    fn test_amount_mismatch_rejected() {
        let request = PricingRequest {
            amount_cents: 4999,
            ..matching_request()
        };
        let check = validate_service_pricing(&service(), &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("amount"));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let request = PricingRequest {
            currency: "eur".to_string(),
            ..matching_request()
        };
        let check = validate_service_pricing(&service(), &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("currency"));
    }

    #[test]
    fn test_unsupported_currency_rejected() {
        let listed = ServicePricing {
            currency: "chf".to_string(),
            ..service()
        };
        let request = PricingRequest {
            currency: "CHF".to_string(),
            ..matching_request()
        };
        let check = validate_service_pricing(&listed, &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("not supported"));
    }

    #[test]
    fn test_duration_mismatch_rejected() {
        let request = PricingRequest {
            duration_minutes: 30,
            ..matching_request()
        };
        let check = validate_service_pricing(&service(), &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("duration"));
    }

    #[test]
    fn test_price_bounds_enforced() {
        let cheap = ServicePricing {
            price_cents: 50,
            ..service()
        };
        let request = PricingRequest {
            amount_cents: 50,
            ..matching_request()
        };
        let check = validate_service_pricing(&cheap, &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("minimum"));

        let steep = ServicePricing {
            price_cents: 2_000_000,
            ..service()
        };
        let request = PricingRequest {
            amount_cents: 2_000_000,
            ..matching_request()
        };
        let check = validate_service_pricing(&steep, &request, &PricingLimits::default());
        assert!(!check.is_valid);
        assert!(check.message.expect("message").contains("maximum"));
    }

    #[test]
    fn test_rejection_echoes_listed_pricing() {
        let request = PricingRequest {
            amount_cents: 1,
            ..matching_request()
        };
        let check = validate_service_pricing(&service(), &request, &PricingLimits::default());
        assert_eq!(check.price_cents, 5000);
        assert_eq!(check.currency, "usd");
    }
}
