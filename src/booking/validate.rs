//! Aggregate booking validation.
//!
//! Runs every check a new booking must pass and collects all failures, so
//! the student sees the complete picture in one round trip instead of
//! fixing problems one at a time.

use crate::booking::availability::{check_within_availability, AvailabilitySlot};
use crate::booking::conflicts::{
    check_booking_conflict, check_buffer_time, check_external_busy, BusyWindow, ExistingBooking,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything known about a proposed booking at validation time.
///
/// Callers fetch the tutor's availability, active bookings, buffer setting,
/// and calendar windows, then hand the plain data here.
#[derive(Debug, Clone, Copy)]
pub struct BookingRequest<'a> {
    /// Proposed start.
    pub scheduled_at: DateTime<Utc>,
    /// Proposed length in minutes.
    pub duration_minutes: u32,
    /// The tutor's weekly availability.
    pub availability: &'a [AvailabilitySlot],
    /// The tutor's existing bookings.
    pub existing_bookings: &'a [ExistingBooking],
    /// The tutor's required gap between sessions, in minutes.
    pub buffer_minutes: u32,
    /// Busy windows from the tutor's external calendars.
    pub busy_windows: &'a [BusyWindow],
    /// The tutor's IANA timezone, if known.
    pub timezone: Option<&'a str>,
}

/// Outcome of validating a proposed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingValidation {
    /// True iff no check failed.
    pub is_valid: bool,
    /// Every failure message, in check order.
    pub errors: Vec<String>,
}

/// Validate a proposed booking against the current clock.
#[must_use]
pub fn validate_booking(request: &BookingRequest<'_>) -> BookingValidation {
    validate_booking_at(Utc::now(), request)
}

/// Validate a proposed booking against an explicit clock reading.
///
/// Runs, in order: past-date check, availability check, conflict check,
/// buffer check, external-busy check. Nothing short-circuits; every
/// failure contributes a message and `is_valid` is true iff none did.
#[must_use]
pub fn validate_booking_at(now: DateTime<Utc>, request: &BookingRequest<'_>) -> BookingValidation {
    let mut errors = Vec::new();

    if request.scheduled_at < now {
        errors.push("Cannot book a session in the past. Please select an upcoming time.".to_string());
    }

    let availability = check_within_availability(
        request.scheduled_at,
        request.duration_minutes,
        request.availability,
        request.timezone,
    );
    if let Some(message) = availability.message {
        errors.push(message);
    }

    let conflict = check_booking_conflict(
        request.scheduled_at,
        request.duration_minutes,
        request.existing_bookings,
    );
    if let Some(message) = conflict.message {
        errors.push(message);
    }

    let buffer = check_buffer_time(
        request.scheduled_at,
        request.duration_minutes,
        request.buffer_minutes,
        request.existing_bookings,
    );
    if let Some(message) = buffer.message {
        errors.push(message);
    }

    let busy = check_external_busy(
        request.scheduled_at,
        request.duration_minutes,
        request.busy_windows,
        request.buffer_minutes,
    );
    if let Some(message) = busy.message {
        errors.push(message);
    }

    BookingValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}
