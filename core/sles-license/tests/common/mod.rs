//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use sles_license::LicenseStore;
use sles_types::ManualClock;
use std::sync::Arc;

/// Returns a store driven by a manual clock frozen at 2025-01-01T00:00:00Z.
pub fn store_with_clock() -> (LicenseStore, Arc<ManualClock>) {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    (LicenseStore::new(clock.clone()), clock)
}
