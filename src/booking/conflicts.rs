//! Booking conflict, buffer-time, and external-calendar checks.
//!
//! All checks are pure: callers fetch the tutor's existing bookings and
//! calendar windows and pass them in as plain data. Business-rule failures
//! come back as structured results, never as errors.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The slice of a stored booking the conflict checks need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBooking {
    /// Booking identifier, echoed back on conflict.
    pub id: String,
    /// Start of the booked interval.
    pub scheduled_at: DateTime<Utc>,
    /// Length of the booked interval in minutes.
    pub duration_minutes: u32,
    /// Booking status; anything starting with "cancelled" is inert.
    pub status: String,
}

impl ExistingBooking {
    /// End of the booked interval.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(i64::from(self.duration_minutes))
    }

    /// Returns true for any cancelled status variant.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status.starts_with("cancelled")
    }
}

/// Result of a booking-conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCheck {
    /// True when the proposed interval overlaps an active booking.
    pub has_conflict: bool,
    /// The first conflicting booking, in input order.
    pub conflicting: Option<ExistingBooking>,
    /// User-facing message, set when a conflict was found.
    pub message: Option<String>,
}

/// Result of a buffer-time check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferCheck {
    /// True when the proposed interval lands inside a buffer zone.
    pub has_buffer_conflict: bool,
    /// User-facing message, set when the buffer was violated.
    pub message: Option<String>,
}

/// A third-party calendar event during which the tutor is busy.
///
/// Timestamps arrive as RFC 3339 strings from the calendar provider; a
/// window that fails to parse is skipped rather than failing the check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyWindow {
    /// Window start, RFC 3339.
    pub start: String,
    /// Window end, RFC 3339.
    pub end: String,
}

/// Result of an external-calendar busy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyCheck {
    /// True when the proposed interval overlaps a busy window.
    pub has_conflict: bool,
    /// User-facing message, set when a busy window was hit.
    pub message: Option<String>,
}

/// Exclusive-boundary overlap: touching endpoints do not overlap.
fn intervals_overlap(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

fn interval_end(scheduled_at: DateTime<Utc>, duration_minutes: u32) -> DateTime<Utc> {
    scheduled_at + Duration::minutes(i64::from(duration_minutes))
}

/// Check a proposed interval against the tutor's existing bookings.
///
/// Cancelled bookings never conflict. Overlap is exclusive at the boundary,
/// so back-to-back bookings are fine. The first conflicting booking in
/// input order is returned; callers wanting a specific priority pre-sort.
#[must_use]
pub fn check_booking_conflict(
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    existing: &[ExistingBooking],
) -> ConflictCheck {
    let end = interval_end(scheduled_at, duration_minutes);

    for booking in existing {
        if booking.is_cancelled() {
            continue;
        }
        if intervals_overlap(scheduled_at, end, booking.scheduled_at, booking.end()) {
            return ConflictCheck {
                has_conflict: true,
                conflicting: Some(booking.clone()),
                message: Some(
                    "This time slot conflicts with an existing booking. Please select a different time."
                        .to_string(),
                ),
            };
        }
    }

    ConflictCheck {
        has_conflict: false,
        conflicting: None,
        message: None,
    }
}

/// Check that the proposed interval respects the tutor's buffer time.
///
/// A buffer of 0 passes trivially. Otherwise every non-cancelled existing
/// interval is padded by `buffer_minutes` on both ends before the same
/// exclusive overlap test.
#[must_use]
pub fn check_buffer_time(
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    buffer_minutes: u32,
    existing: &[ExistingBooking],
) -> BufferCheck {
    if buffer_minutes == 0 {
        return BufferCheck {
            has_buffer_conflict: false,
            message: None,
        };
    }

    let end = interval_end(scheduled_at, duration_minutes);
    let pad = Duration::minutes(i64::from(buffer_minutes));

    for booking in existing {
        if booking.is_cancelled() {
            continue;
        }
        if intervals_overlap(
            scheduled_at,
            end,
            booking.scheduled_at - pad,
            booking.end() + pad,
        ) {
            return BufferCheck {
                has_buffer_conflict: true,
                message: Some(format!(
                    "This tutor requires {buffer_minutes} minutes between sessions. Please select a time further from existing bookings."
                )),
            };
        }
    }

    BufferCheck {
        has_buffer_conflict: false,
        message: None,
    }
}

/// Check the proposed interval against third-party calendar busy windows.
///
/// Windows are padded by `buffer_minutes` on both ends (pass 0 for none);
/// windows whose timestamps do not parse are skipped, since calendar data
/// is best effort.
#[must_use]
pub fn check_external_busy(
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    busy_windows: &[BusyWindow],
    buffer_minutes: u32,
) -> BusyCheck {
    let end = interval_end(scheduled_at, duration_minutes);
    let pad = Duration::minutes(i64::from(buffer_minutes));

    for window in busy_windows {
        let Some((busy_start, busy_end)) = parse_window(window) else {
            debug!(
                "Skipping unparsable busy window ({} .. {})",
                window.start, window.end
            );
            continue;
        };
        if intervals_overlap(scheduled_at, end, busy_start - pad, busy_end + pad) {
            return BusyCheck {
                has_conflict: true,
                message: Some(
                    "The tutor's calendar shows a conflicting event at this time. Please select a different time."
                        .to_string(),
                ),
            };
        }
    }

    BusyCheck {
        has_conflict: false,
        message: None,
    }
}

fn parse_window(window: &BusyWindow) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = DateTime::parse_from_rfc3339(&window.start).ok()?;
    let end = DateTime::parse_from_rfc3339(&window.end).ok()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}
