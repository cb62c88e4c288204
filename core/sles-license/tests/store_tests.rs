mod common;

use chrono::Duration;
use common::store_with_clock;
use sles_license::{LicenseError, LicenseKind, LicenseStore};
use sles_types::LicenseId;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ── Issue ────────────────────────────────────────────────────────

#[test]
fn issue_stores_license() {
    let (store, _) = store_with_clock();
    let license = store.issue(LicenseKind::TimeBound, 7).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.validate(license.id()).unwrap(), license);
}

#[test]
fn issue_rejects_bad_magnitude_without_storing() {
    let (store, _) = store_with_clock();
    assert!(store.issue(LicenseKind::UsageLimited, 0).is_err());
    assert!(store.issue(LicenseKind::TimeBound, -3).is_err());
    assert!(store.is_empty());
}

#[test]
fn issued_ids_are_unique() {
    let (store, _) = store_with_clock();
    let a = store.issue(LicenseKind::UsageLimited, 1).unwrap();
    let b = store.issue(LicenseKind::UsageLimited, 1).unwrap();
    assert_ne!(a.id(), b.id());
}

#[test]
fn list_returns_every_license() {
    let (store, _) = store_with_clock();
    let a = store.issue(LicenseKind::TimeBound, 1).unwrap();
    let b = store.issue(LicenseKind::UsageLimited, 2).unwrap();
    let ids: Vec<LicenseId> = store.list().iter().map(|l| l.id()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&a.id()));
    assert!(ids.contains(&b.id()));
}

// ── Validate ─────────────────────────────────────────────────────

#[test]
fn validate_unknown_license() {
    let (store, _) = store_with_clock();
    let id = LicenseId::new();
    assert!(matches!(store.validate(id), Err(LicenseError::NotFound(missing)) if missing == id));
}

#[test]
fn time_bound_valid_until_expiry() {
    let (store, clock) = store_with_clock();
    let license = store.issue(LicenseKind::TimeBound, 7).unwrap();

    clock.advance(Duration::days(7) - Duration::seconds(1));
    assert!(store.validate(license.id()).is_ok());

    clock.advance(Duration::seconds(1));
    assert!(matches!(store.validate(license.id()), Err(LicenseError::Expired { .. })));
}

#[test]
fn validate_has_no_side_effects() {
    let (store, _) = store_with_clock();
    let license = store.issue(LicenseKind::UsageLimited, 1).unwrap();
    for _ in 0..5 {
        assert_eq!(store.validate(license.id()).unwrap().remaining_uses(), Some(1));
    }
}

// ── Consume ──────────────────────────────────────────────────────

#[test]
fn usage_limited_allows_exactly_n_uses() {
    let (store, _) = store_with_clock();
    let license = store.issue(LicenseKind::UsageLimited, 3).unwrap();

    for expected_left in [2, 1, 0] {
        store.validate(license.id()).unwrap();
        let updated = store.consume_use(license.id()).unwrap();
        assert_eq!(updated.remaining_uses(), Some(expected_left));
    }

    assert!(matches!(store.validate(license.id()), Err(LicenseError::Exhausted(_))));
    assert!(matches!(store.consume_use(license.id()), Err(LicenseError::Exhausted(_))));
    assert_eq!(store.list()[0].remaining_uses(), Some(0));
}

#[test]
fn consume_is_noop_for_time_bound() {
    let (store, _) = store_with_clock();
    let license = store.issue(LicenseKind::TimeBound, 1).unwrap();
    let after = store.consume_use(license.id()).unwrap();
    assert_eq!(after, license);
}

#[test]
fn consume_unknown_license() {
    let (store, _) = store_with_clock();
    assert!(matches!(store.consume_use(LicenseId::new()), Err(LicenseError::NotFound(_))));
}

#[test]
fn concurrent_consumers_cannot_double_spend() {
    let store = Arc::new(LicenseStore::default());
    let license = store.issue(LicenseKind::UsageLimited, 25).unwrap();
    let successes = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            let successes = Arc::clone(&successes);
            let license_id = license.id();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    if store.consume_use(license_id).is_ok() {
                        successes.fetch_add(1, Ordering::SeqCst);
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(successes.load(Ordering::SeqCst), 25);
    assert!(matches!(
        store.validate(license.id()),
        Err(LicenseError::Exhausted(id)) if id == license.id()
    ));
}
