//! Student payment routing.
//!
//! Decides which payment path applies for a booking given the tutor's
//! connected-account readiness: a direct destination charge when the
//! account can take one, an external payment link as the secondary path,
//! or "no payment method" as the terminal state the caller must surface.

use crate::payments::connect::TutorAccountStatus;
use serde::{Deserialize, Serialize};

/// Payment path selected for a student's booking payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRoute {
    /// Destination charge straight to the tutor's connected account.
    ConnectDestination,
    /// External payment link shared by the tutor.
    PaymentLink,
    /// The tutor cannot currently accept payment at all.
    NoPaymentMethod,
}

/// Why a particular route was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteReason {
    /// The connected account exists and charges are enabled.
    ConnectReady,
    /// No charge-ready account, but the tutor shared a payment link.
    UsePaymentLink,
    /// Neither a charge-ready account nor a payment link exists.
    NoPaymentMethodAvailable,
}

/// Route plus the reason it was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRouteDecision {
    /// Selected payment path.
    pub route: PaymentRoute,
    /// Why it was selected.
    pub reason: RouteReason,
}

impl PaymentRouteDecision {
    /// Returns true if some way of collecting payment exists.
    #[must_use]
    pub fn can_collect(&self) -> bool {
        !matches!(self.route, PaymentRoute::NoPaymentMethod)
    }
}

/// Decide the payment path for a student paying a tutor.
///
/// First match wins, in order: a charge-ready connected account (non-null
/// identifier with charges enabled) takes a destination charge regardless
/// of any link; otherwise an existing payment link is used; otherwise no
/// payment method is available. The last case is reported, never silently
/// defaulted to a platform charge.
#[must_use]
pub fn route_student_payment(
    status: &TutorAccountStatus,
    has_payment_link: bool,
) -> PaymentRouteDecision {
    if status.is_charge_ready() {
        return PaymentRouteDecision {
            route: PaymentRoute::ConnectDestination,
            reason: RouteReason::ConnectReady,
        };
    }

    if has_payment_link {
        return PaymentRouteDecision {
            route: PaymentRoute::PaymentLink,
            reason: RouteReason::UsePaymentLink,
        };
    }

    PaymentRouteDecision {
        route: PaymentRoute::NoPaymentMethod,
        reason: RouteReason::NoPaymentMethodAvailable,
    }
}
