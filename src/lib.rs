//! # tutorlane-core
//!
//! Decision core for the Tutorlane tutoring marketplace.
//!
//! This crate holds the pure business rules the platform services call into:
//! - Booking validation against availability, conflicts, buffers, and
//!   external calendars
//! - Payment routing, tutor payout fees, and service pricing checks
//! - A two-tier cache for generated grammar explanations
//!
//! ## Architecture
//!
//! Every decision is a function over plain data. Callers fetch state
//! (bookings, account status, pricing) from their own storage, pass it in,
//! and receive structured results carrying user-facing messages. The only
//! stateful component is the explanation cache, which owns its tiers behind
//! [`ExplanationCache`].
//!
//! ## Example
//!
//! ```rust
//! use tutorlane_core::{compute_application_fee, ApplicationFeePolicy};
//!
//! let policy = ApplicationFeePolicy::Percent {
//!     percent: 10.0,
//!     min_fee_cents: Some(99),
//! };
//! let breakdown = compute_application_fee(5_000, &policy);
//! assert_eq!(breakdown.application_fee_cents, 500);
//! assert_eq!(breakdown.net_to_tutor_cents, 4_500);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod booking;
pub mod cache;
pub mod config;
pub mod error;
pub mod payments;

pub use booking::{
    validate_booking, validate_booking_at, AvailabilitySlot, BookingRequest, BookingValidation,
    BusyWindow, ExistingBooking,
};
pub use cache::{
    CachedExplanation, ExplanationCache, ExplanationCacheConfig, ExplanationKey,
    MemoryExplanationStore, RedisExplanationStore,
};
pub use config::{BookingConfig, CoreConfig};
pub use error::{Error, Result};
pub use payments::{
    compute_application_fee, extract_account_status, route_student_payment,
    validate_service_pricing, ApplicationFeePolicy, FeeBreakdown, PaymentRoute,
    PaymentRouteDecision, TutorAccountStatus,
};
