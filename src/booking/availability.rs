//! Weekly availability checks.
//!
//! A tutor publishes recurring weekly slots in their own timezone; a
//! proposed booking is valid only when the whole interval fits inside one
//! available slot on the matching weekday. Instants are converted into the
//! tutor's IANA timezone first; a missing or unrecognized timezone falls
//! back silently to the raw instant, since callers rely on the check still
//! answering when a profile carries a malformed timezone string.

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One recurring weekly availability slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// Weekday, 0 = Sunday through 6 = Saturday.
    pub day_of_week: u8,
    /// Slot start as "HH:mm" (a trailing ":ss" is ignored).
    pub start_time: String,
    /// Slot end as "HH:mm" (a trailing ":ss" is ignored).
    pub end_time: String,
    /// Whether the tutor actually takes bookings in this slot.
    pub is_available: bool,
}

/// Result of an availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityCheck {
    /// True when the whole interval fits an available slot.
    pub is_within_availability: bool,
    /// User-facing message, set when the interval does not fit.
    pub message: Option<String>,
}

/// Parse "HH:mm" or "HH:mm:ss" into minutes since midnight.
///
/// Components clamp to 0-23 / 0-59 and unparsable components read as 0, so
/// a malformed slot degrades instead of failing the check.
fn parse_time_minutes(time: &str) -> u32 {
    let mut parts = time.split(':');
    let hour = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(0)
        .min(23);
    let minute = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(0)
        .min(59);
    hour * 60 + minute
}

/// Check that a proposed interval sits inside the tutor's weekly availability.
///
/// The weekday and time-of-day are taken in `timezone` when it parses as an
/// IANA name, otherwise from the raw instant. Comparison is by minutes
/// since midnight, so an interval crossing local midnight fits no slot.
#[must_use]
pub fn check_within_availability(
    scheduled_at: DateTime<Utc>,
    duration_minutes: u32,
    availability: &[AvailabilitySlot],
    timezone: Option<&str>,
) -> AvailabilityCheck {
    let (weekday, start_minutes) = match timezone.map(|name| (name, name.parse::<Tz>())) {
        Some((_, Ok(tz))) => {
            let local = scheduled_at.with_timezone(&tz);
            (
                local.weekday().num_days_from_sunday(),
                local.hour() * 60 + local.minute(),
            )
        }
        Some((name, Err(_))) => {
            debug!("Timezone {name:?} not recognized, using the raw instant");
            (
                scheduled_at.weekday().num_days_from_sunday(),
                scheduled_at.hour() * 60 + scheduled_at.minute(),
            )
        }
        None => (
            scheduled_at.weekday().num_days_from_sunday(),
            scheduled_at.hour() * 60 + scheduled_at.minute(),
        ),
    };
    let end_minutes = start_minutes.saturating_add(duration_minutes);

    let fits = availability.iter().any(|slot| {
        slot.is_available
            && u32::from(slot.day_of_week) == weekday
            && parse_time_minutes(&slot.start_time) <= start_minutes
            && end_minutes <= parse_time_minutes(&slot.end_time)
    });

    if fits {
        AvailabilityCheck {
            is_within_availability: true,
            message: None,
        }
    } else {
        AvailabilityCheck {
            is_within_availability: false,
            message: Some(
                "The selected time is outside the tutor's availability. Please choose a time within their available hours."
                    .to_string(),
            ),
        }
    }
}
