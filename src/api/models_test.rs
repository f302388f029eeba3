use super::*;
use crate::auth::PosType;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

fn subscription_ending(end: chrono::DateTime<Utc>) -> Subscription {
    Subscription {
        id: json!(1),
        package: None,
        start_date: None,
        end_date: end,
        extra: Default::default(),
    }
}

// =============================================================
// Subscription status
// =============================================================

#[test]
fn no_subscription() {
    assert_eq!(SubscriptionStatus::of(None, Utc::now()), SubscriptionStatus::None);
}

#[test]
fn days_left_rounds_up() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
    let sub = subscription_ending(now + Duration::hours(1));
    assert_eq!(sub.days_left(now), 1);
    let sub = subscription_ending(now + Duration::days(3) + Duration::minutes(5));
    assert_eq!(sub.days_left(now), 4);
    let sub = subscription_ending(now - Duration::hours(1));
    assert_eq!(sub.days_left(now), 0);
    let sub = subscription_ending(now - Duration::days(2));
    assert_eq!(sub.days_left(now), -2);
}

#[test]
fn status_thresholds() {
    let now = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    assert_eq!(subscription_ending(now).status_at(now), SubscriptionStatus::Expired);
    assert_eq!(
        subscription_ending(now + Duration::days(7)).status_at(now),
        SubscriptionStatus::ExpiringSoon { days_left: 7 }
    );
    assert_eq!(
        subscription_ending(now + Duration::days(8)).status_at(now),
        SubscriptionStatus::Active
    );
}

// =============================================================
// Wire shapes
// =============================================================

#[test]
fn package_parses_backend_shape() {
    let pkg: Package = serde_json::from_value(json!({
        "id": 3,
        "name": "Pro",
        "description": "All features",
        "price": 1290,
        "duration": "monthly",
        "features": ["inventory", "reports"],
        "pos_type": "coffee",
        "is_popular": true
    }))
    .unwrap();
    assert_eq!(pkg.price, 1290.0);
    assert_eq!(pkg.duration, Some(BillingCycle::Monthly));
    assert_eq!(pkg.pos_type, Some(PosType::Coffee));
    assert_eq!(pkg.extra.get("is_popular"), Some(&json!(true)));
}

#[test]
fn store_path_id_handles_numbers_and_strings() {
    let store: Store = serde_json::from_value(json!({"id": 12, "name": "Main"})).unwrap();
    assert_eq!(store.path_id(), "12");
    assert!(!store.is_open);
    let store: Store = serde_json::from_value(json!({"id": "s-9", "name": "Kiosk", "is_open": true})).unwrap();
    assert_eq!(store.path_id(), "s-9");
    assert!(store.is_open);
}

#[test]
fn store_input_omits_unset_fields() {
    let input = StoreInput {
        name: Some("Branch 2".into()),
        ..StoreInput::default()
    };
    assert_eq!(serde_json::to_value(&input).unwrap(), json!({"name": "Branch 2"}));
}

// =============================================================
// Backend date formats
// =============================================================

fn end_date_of(raw: &str) -> chrono::DateTime<Utc> {
    serde_json::from_value::<Subscription>(json!({"id": 1, "end_date": raw}))
        .unwrap()
        .end_date
}

#[test]
fn end_date_accepts_rfc3339_with_offset() {
    assert_eq!(
        end_date_of("2026-12-31T07:00:00+07:00"),
        Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()
    );
    assert_eq!(
        end_date_of("2026-12-31T00:00:00.000Z"),
        Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()
    );
}

#[test]
fn end_date_accepts_naive_datetime_as_utc() {
    assert_eq!(
        end_date_of("2026-12-31T08:30:00"),
        Utc.with_ymd_and_hms(2026, 12, 31, 8, 30, 0).unwrap()
    );
    assert_eq!(
        end_date_of("2026-12-31 08:30:00.250"),
        Utc.with_ymd_and_hms(2026, 12, 31, 8, 30, 0).unwrap() + Duration::milliseconds(250)
    );
}

#[test]
fn end_date_accepts_bare_date() {
    assert_eq!(
        end_date_of("2026-12-31"),
        Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap()
    );
}

#[test]
fn start_date_is_optional_and_lenient() {
    let sub: Subscription = serde_json::from_value(json!({
        "id": 1,
        "start_date": "2026-01-01",
        "end_date": "2026-12-31"
    }))
    .unwrap();
    assert_eq!(sub.start_date, Some(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()));

    let sub: Subscription = serde_json::from_value(json!({"id": 1, "start_date": null, "end_date": "2026-12-31"})).unwrap();
    assert_eq!(sub.start_date, None);
}

#[test]
fn unparseable_end_date_is_rejected() {
    let result = serde_json::from_value::<Subscription>(json!({"id": 1, "end_date": "next tuesday"}));
    assert!(result.is_err());
}
