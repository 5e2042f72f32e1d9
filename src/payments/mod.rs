//! Payment decision modules for the tutoring marketplace.
//!
//! Pure leaf functions invoked by the server-action layer, which fetches
//! the records and passes plain data in:
//! 1. Extract a normalized account status from the provider's raw record
//! 2. Route the student's payment based on that status
//! 3. Split the gross amount into application fee and tutor payout
//!
//! # Architecture
//!
//! ```text
//! raw provider record
//!         │
//!         ▼
//! ┌──────────────────────┐
//! │ extract_account_status│──▶ TutorAccountStatus
//! └──────────────────────┘          │
//!                                   ▼
//!                      ┌──────────────────────┐
//!   has_payment_link ─▶│ route_student_payment │──▶ PaymentRouteDecision
//!                      └──────────────────────┘
//!
//!   gross + policy ──▶ compute_application_fee ──▶ FeeBreakdown
//!   service + request ──▶ validate_service_pricing ──▶ PricingCheck
//! ```

pub mod connect;
pub mod fees;
pub mod pricing;
pub mod routing;

pub use connect::{extract_account_status, OnboardingStatus, TutorAccountStatus};
pub use fees::{compute_application_fee, ApplicationFeePolicy, FeeBreakdown};
pub use pricing::{
    validate_service_pricing, PricingCheck, PricingLimits, PricingRequest, ServicePricing,
};
pub use routing::{route_student_payment, PaymentRoute, PaymentRouteDecision, RouteReason};
