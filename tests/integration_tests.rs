//! Integration tests exercising the decision core end to end.
//!
//! These tests drive whole flows the way the platform services do: validate
//! a booking, split the payment, route the charge, and resolve explanations
//! through the cache.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use tutorlane_core::cache::{LookupSource, WriteOptions};
use tutorlane_core::payments::PaymentRoute;
use tutorlane_core::{
    compute_application_fee, extract_account_status, route_student_payment, validate_booking_at,
    ApplicationFeePolicy, AvailabilitySlot, BookingRequest, CoreConfig, ExistingBooking,
    ExplanationCache, ExplanationKey, MemoryExplanationStore,
};

// 2030-06-03 is a Monday
fn monday_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 3, hour, minute, 0)
        .single()
        .expect("valid time")
}

fn clock() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0)
        .single()
        .expect("valid time")
}

fn weekday_availability() -> Vec<AvailabilitySlot> {
    (1..=5)
        .map(|day| AvailabilitySlot {
            day_of_week: day,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            is_available: true,
        })
        .collect()
}

/// Test the full happy path: a valid slot is booked, the platform fee is
/// split out, and the charge is routed to the tutor's connected account.
#[test]
fn test_booking_to_payment_flow() {
    let availability = weekday_availability();
    let existing = [ExistingBooking {
        id: "existing-1".to_string(),
        scheduled_at: monday_at(16, 0),
        duration_minutes: 60,
        status: "confirmed".to_string(),
    }];

    // 14:00 UTC is 10:00 in New York, inside the 09:00-17:00 window
    let request = BookingRequest {
        scheduled_at: monday_at(14, 0),
        duration_minutes: 60,
        availability: &availability,
        existing_bookings: &existing,
        buffer_minutes: 15,
        busy_windows: &[],
        timezone: Some("America/New_York"),
    };
    let validation = validate_booking_at(clock(), &request);
    assert!(validation.is_valid, "{:?}", validation.errors);

    // Split a $50.00 session under a 10% fee with a $0.99 floor
    let policy = ApplicationFeePolicy::Percent {
        percent: 10.0,
        min_fee_cents: Some(99),
    };
    let breakdown = compute_application_fee(5_000, &policy);
    assert_eq!(breakdown.application_fee_cents, 500);
    assert_eq!(breakdown.net_to_tutor_cents, 4_500);

    // Tutor finished onboarding, so the charge goes to their account
    let status = extract_account_status(&json!({
        "id": "acct_123",
        "charges_enabled": true,
        "payouts_enabled": true,
        "details_submitted": true,
    }));
    let decision = route_student_payment(&status, false);
    assert_eq!(decision.route, PaymentRoute::ConnectDestination);
    assert!(decision.can_collect());
}

/// Test that a booking failing several checks reports every failure, not
/// just the first one encountered.
#[test]
fn test_rejected_booking_reports_every_problem() {
    let availability = weekday_availability();
    let existing = [ExistingBooking {
        id: "existing-1".to_string(),
        scheduled_at: monday_at(10, 0),
        duration_minutes: 60,
        status: "confirmed".to_string(),
    }];

    let request = BookingRequest {
        scheduled_at: monday_at(10, 30),
        duration_minutes: 60,
        availability: &availability,
        existing_bookings: &existing,
        buffer_minutes: 0,
        busy_windows: &[],
        timezone: None,
    };

    // A clock after the proposed start makes it a past booking too
    let late_clock = Utc
        .with_ymd_and_hms(2030, 6, 10, 0, 0, 0)
        .single()
        .expect("valid time");
    let validation = validate_booking_at(late_clock, &request);
    assert!(!validation.is_valid);
    assert!(
        validation.errors.len() >= 2,
        "expected multiple errors, got {:?}",
        validation.errors
    );
}

/// Test that a tutor without a usable payment method is surfaced as such
/// rather than silently falling back anywhere.
#[test]
fn test_unroutable_payment_is_explicit() {
    let status = extract_account_status(&json!({}));
    let decision = route_student_payment(&status, false);
    assert_eq!(decision.route, PaymentRoute::NoPaymentMethod);
    assert!(!decision.can_collect());

    let serialized = serde_json::to_value(&decision).expect("serialize");
    assert_eq!(serialized["route"], "no_payment_method");
}

/// Test that an explanation is generated exactly once and then served from
/// the cache, regardless of how the key is spelled.
#[tokio::test]
async fn test_explanations_generate_once_then_cache() {
    let config = CoreConfig::default();
    let cache = ExplanationCache::new(MemoryExplanationStore::new(), config.cache);

    let first = cache
        .get_or_generate(
            &ExplanationKey::new("Past_Tense", "ES", "Beginner"),
            None,
            |key| async move { Ok(format!("All about {} in {}.", key.category, key.language)) },
        )
        .await
        .expect("generate");
    assert_eq!(first.source, LookupSource::Generated);
    assert_eq!(first.entry.explanation, "All about past-tense in es.");

    let second = cache
        .get_or_generate(&ExplanationKey::new("past-tense", "es", "beginner"), None, |_| async {
            panic!("generator must not run for a cached key")
        })
        .await
        .expect("lookup");
    assert_eq!(second.source, LookupSource::Local);
    assert_eq!(second.entry.explanation, first.entry.explanation);

    let stats = cache.stats();
    assert_eq!(stats.generated, 1);
    assert_eq!(stats.hits, 1);
}

/// Test that warming seeds a deterministic entry that later lookups hit.
#[tokio::test]
async fn test_warming_seeds_the_cache() {
    let cache = ExplanationCache::new(
        MemoryExplanationStore::new(),
        CoreConfig::default().cache,
    );
    let key = ExplanationKey::new("articles", "en", "beginner");

    let warmed = cache.warm(&key, None).await.expect("warm");
    assert_eq!(warmed.source, LookupSource::Generated);

    let looked_up = cache.get(&key).await.expect("get").expect("entry");
    assert_eq!(looked_up.explanation, warmed.entry.explanation);

    // Warming again must not replace the entry
    let again = cache.warm(&key, None).await.expect("warm");
    assert_eq!(again.source, LookupSource::Local);
}

/// Test that manual writes honor per-write TTL and timestamp overrides.
#[tokio::test]
async fn test_manual_write_with_overrides() {
    let cache = ExplanationCache::new(
        MemoryExplanationStore::new(),
        CoreConfig::default().cache,
    );
    let key = ExplanationKey::new("plurals", "de", "intermediate");
    let stamped = Utc
        .with_ymd_and_hms(2030, 1, 1, 0, 0, 0)
        .single()
        .expect("valid time");

    let entry = cache
        .insert(
            &key,
            "German plurals follow several patterns.",
            WriteOptions {
                ttl_seconds: Some(60),
                generated_at: Some(stamped),
            },
        )
        .await
        .expect("insert");
    assert_eq!(entry.generated_at, stamped);

    let resolved = cache.get(&key).await.expect("get").expect("entry");
    assert_eq!(resolved.generated_at, stamped);
}
