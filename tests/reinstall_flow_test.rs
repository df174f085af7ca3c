//! End-to-end startup scenarios against in-memory stores.

mod common;

use std::sync::Arc;

use common::*;
use reinstall_guard::adapters::mock::{InMemoryPreferences, InMemorySecureStore};
use reinstall_guard::liveness::{LaunchMark, LivenessTracker, StalenessVerdict};
use reinstall_guard::purge::CredentialPurger;
use serde_json::json;

/// Mark 8 days old, mixed preferences, 3 secure records.
#[test]
fn test_reinstall_after_eight_days() {
    let prefs = InMemoryPreferences::with_entries([
        ("last_app_launch", json!((NOW - 8 * DAY) as f64)),
        ("flutter.x", json!(1)),
        ("auth_token", json!("abc")),
        ("other", json!(2)),
    ]);
    let secure = secure_with_records(3);

    let outcome = guard_over(&prefs, &secure).run(at(NOW));

    assert_eq!(outcome.verdict, StalenessVerdict::Fresh);
    assert!(outcome.errors.is_empty());

    let snapshot = prefs.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot["other"], json!(2));
    assert_eq!(snapshot["last_app_launch"], json!(NOW as f64));
    assert!(secure.is_empty(SERVICE));
}

#[test]
fn test_first_launch_never_purges() {
    for now in [0, NOW, NOW + 365 * DAY] {
        let prefs = InMemoryPreferences::with_entries([("auth_token", json!("abc"))]);
        let secure = secure_with_records(2);

        let outcome = guard_over(&prefs, &secure).run(at(now));

        assert_eq!(outcome.verdict, StalenessVerdict::Continuing);
        assert!(outcome.purge.is_none());
        assert!(secure.delete_calls().is_empty());
        assert!(prefs.snapshot().contains_key("auth_token"));
    }
}

#[test]
fn test_threshold_boundary() {
    let prefs = InMemoryPreferences::with_entries([("last_app_launch", json!(NOW as f64))]);
    let tracker = LivenessTracker::new(Arc::new(prefs));
    assert_eq!(
        tracker.evaluate(at(NOW + 7 * DAY)),
        StalenessVerdict::Continuing
    );
    assert_eq!(
        tracker.evaluate(at(NOW + 7 * DAY) + chrono::Duration::microseconds(1)),
        StalenessVerdict::Fresh
    );
}

#[test]
fn test_mark_advances_on_every_run() {
    let prefs = InMemoryPreferences::new();
    let secure = InMemorySecureStore::new();
    let guard = guard_over(&prefs, &secure);

    let mut last = f64::MIN;
    for day in 0..5 {
        guard.run(at(NOW + day * DAY));
        let mark = guard.tracker().last_launch().unwrap().unwrap();
        assert!(mark.epoch_seconds > last);
        last = mark.epoch_seconds;
    }
    assert_eq!(last, (NOW + 4 * DAY) as f64);
}

#[test]
fn test_filter_example_leaves_only_theme() {
    let prefs = InMemoryPreferences::with_entries([
        ("flutter.session", json!("s")),
        ("user_token_abc", json!("t")),
        ("theme", json!("dark")),
        ("auth_cache", json!([1, 2])),
    ]);
    let secure = InMemorySecureStore::new();

    CredentialPurger::new(Arc::new(prefs.clone()), Arc::new(secure), SERVICE).purge_all();

    let keys: Vec<_> = prefs.snapshot().into_keys().collect();
    assert_eq!(keys, vec!["theme"]);
}

#[test]
fn test_secure_store_cleared_regardless_of_size() {
    for count in [1, 3, 50] {
        let secure = secure_with_records(count);
        let report = CredentialPurger::new(
            Arc::new(InMemoryPreferences::new()),
            Arc::new(secure.clone()),
            SERVICE,
        )
        .purge_all();

        assert!(report.secure_store.is_cleared());
        assert!(secure.is_empty(SERVICE));
    }
}

#[test]
fn test_unreachable_stores_are_reported() {
    let prefs = InMemoryPreferences::with_entries([
        ("last_app_launch", json!((NOW - 8 * DAY) as f64)),
        ("auth_token", json!("abc")),
    ]);
    let secure = secure_with_records(1);
    secure.set_delete_should_fail(true);

    let outcome = guard_over(&prefs, &secure).run(at(NOW));

    let report = outcome.purge.expect("stale mark should trigger a purge");
    assert!(!report.secure_store.is_cleared());
    assert_eq!(report.preferences.deleted, vec!["auth_token"]);
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.mark_recorded);
}

#[test]
fn test_stale_mark_with_unreachable_preferences_does_nothing() {
    let prefs = InMemoryPreferences::with_entries([
        ("last_app_launch", json!((NOW - 30 * DAY) as f64)),
        ("auth_token", json!("abc")),
    ]);
    prefs.set_read_should_fail(true);
    let secure = secure_with_records(1);

    let outcome = guard_over(&prefs, &secure).run(at(NOW));

    assert_eq!(outcome.verdict, StalenessVerdict::Continuing);
    assert_eq!(secure.len(SERVICE), 1);
}

#[test]
fn test_failed_mark_write_delays_detection_only() {
    let prefs = InMemoryPreferences::with_entries([("last_app_launch", json!(NOW as f64))]);
    let secure = secure_with_records(1);
    let guard = guard_over(&prefs, &secure);

    prefs.set_write_should_fail(true);
    let outcome = guard.run(at(NOW + DAY));
    assert!(!outcome.mark_recorded);
    assert_eq!(
        guard.tracker().last_launch().unwrap(),
        Some(LaunchMark::new(NOW as f64))
    );

    prefs.set_write_should_fail(false);
    let outcome = guard.run(at(NOW + 8 * DAY));
    assert!(outcome.verdict.is_fresh());
    assert!(secure.is_empty(SERVICE));
}
