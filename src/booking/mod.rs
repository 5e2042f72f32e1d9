//! Booking validation for tutoring sessions.
//!
//! A proposed booking must clear five independent checks before it is
//! accepted. Each check is a pure function over plain data so callers can
//! run them individually or let [`validate_booking`] aggregate them:
//!
//! ```text
//!                        ┌──────────────────┐
//!   proposed booking ───▶│  past-date check  │──┐
//!                        ├──────────────────┤  │
//!   weekly availability ▶│ availability check│──┤
//!                        ├──────────────────┤  ├──▶ errors: Vec<String>
//!   existing bookings ──▶│  conflict check   │──┤
//!                        ├──────────────────┤  │
//!   buffer minutes ─────▶│   buffer check    │──┤
//!                        ├──────────────────┤  │
//!   calendar windows ───▶│ external-busy chk │──┘
//!                        └──────────────────┘
//! ```
//!
//! All failures are collected; none of the checks short-circuits the rest.

pub mod availability;
pub mod conflicts;
pub mod policy;
pub mod validate;

pub use availability::{check_within_availability, AvailabilityCheck, AvailabilitySlot};
pub use conflicts::{
    check_booking_conflict, check_buffer_time, check_external_busy, BufferCheck, BusyCheck,
    BusyWindow, ConflictCheck, ExistingBooking,
};
pub use policy::{check_advance_window, AdvanceWindowCheck, AdvanceWindowPolicy};
pub use validate::{validate_booking, validate_booking_at, BookingRequest, BookingValidation};
