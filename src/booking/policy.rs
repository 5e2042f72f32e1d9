//! Advance-booking window policy.
//!
//! Tutors can require a minimum notice period and cap how far ahead
//! students may book. Both bounds are optional; an absent bound never
//! rejects.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How soon and how far ahead of now a booking may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdvanceWindowPolicy {
    /// Minimum notice before the session starts, in hours.
    #[serde(default)]
    pub min_notice_hours: Option<u32>,

    /// Maximum days ahead a session may be booked.
    #[serde(default)]
    pub max_advance_days: Option<u32>,
}

/// Result of an advance-window check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceWindowCheck {
    /// True when the start respects both bounds.
    pub is_within_window: bool,
    /// User-facing message, set when a bound was violated.
    pub message: Option<String>,
}

/// Check a proposed start against the tutor's advance-window policy.
///
/// Deterministic in `now` so callers and tests share one clock reading.
#[must_use]
pub fn check_advance_window(
    now: DateTime<Utc>,
    scheduled_at: DateTime<Utc>,
    policy: &AdvanceWindowPolicy,
) -> AdvanceWindowCheck {
    if let Some(hours) = policy.min_notice_hours {
        if scheduled_at < now + Duration::hours(i64::from(hours)) {
            return AdvanceWindowCheck {
                is_within_window: false,
                message: Some(format!(
                    "Bookings must be made at least {hours} hours in advance."
                )),
            };
        }
    }

    if let Some(days) = policy.max_advance_days {
        if scheduled_at > now + Duration::days(i64::from(days)) {
            return AdvanceWindowCheck {
                is_within_window: false,
                message: Some(format!(
                    "Bookings can be made at most {days} days in advance."
                )),
            };
        }
    }

    AdvanceWindowCheck {
        is_within_window: true,
        message: None,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 3, 12, 0, 0)
            .single()
            .expect("valid time")
    }

    #[test]
    fn test_no_policy_always_passes() {
        let policy = AdvanceWindowPolicy::default();
        let check = check_advance_window(clock(), clock() - Duration::days(400), &policy);
        assert!(check.is_within_window);
    }

    #[test]
    fn test_too_soon_rejected() {
        let policy = AdvanceWindowPolicy {
            min_notice_hours: Some(24),
            max_advance_days: None,
        };
        let check = check_advance_window(clock(), clock() + Duration::hours(2), &policy);
        assert!(!check.is_within_window);
        assert!(check.message.expect("message").contains("24 hours"));
    }

    #[test]
    fn test_too_far_rejected() {
        let policy = AdvanceWindowPolicy {
            min_notice_hours: None,
            max_advance_days: Some(30),
        };
        let check = check_advance_window(clock(), clock() + Duration::days(45), &policy);
        assert!(!check.is_within_window);
        assert!(check.message.expect("message").contains("30 days"));
    }

    #[test]
    fn test_boundaries_inclusive() {
        let policy = AdvanceWindowPolicy {
            min_notice_hours: Some(24),
            max_advance_days: Some(30),
        };
        let at_min = check_advance_window(clock(), clock() + Duration::hours(24), &policy);
        assert!(at_min.is_within_window);
        let at_max = check_advance_window(clock(), clock() + Duration::days(30), &policy);
        assert!(at_max.is_within_window);
    }

    #[test]
    fn test_inside_window_passes() {
        let policy = AdvanceWindowPolicy {
            min_notice_hours: Some(24),
            max_advance_days: Some(30),
        };
        let check = check_advance_window(clock(), clock() + Duration::days(7), &policy);
        assert!(check.is_within_window);
    }
}
