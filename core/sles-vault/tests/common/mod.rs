//! Shared test helpers for vault tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use sles_types::ManualClock;
use sles_vault::{Vault, VaultConfig};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// A vault over a fresh temporary directory, driven by a manual clock.
pub struct Fixture {
    pub vault: Vault,
    pub clock: Arc<ManualClock>,
    pub dir: TempDir,
}

pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
    ));
    let config = VaultConfig {
        public_base_url: "http://files.test".to_string(),
        ..VaultConfig::with_output_dir(dir.path())
    };
    let vault = Vault::open_with_clock(config, clock.clone()).unwrap();
    Fixture { vault, clock, dir }
}

/// Names of all files currently in `dir`, sorted.
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
