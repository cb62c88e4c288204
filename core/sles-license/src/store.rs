//! In-memory license store.

use crate::error::{LicenseError, LicenseResult};
use crate::license::{License, LicenseKind};
use sles_types::{Clock, LicenseId, SystemClock};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Volatile store of issued licenses.
///
/// All reads and writes go through one mutex, which makes
/// [`consume_use`](Self::consume_use) atomic with respect to concurrent
/// validation and consumption of the same license.
pub struct LicenseStore {
    licenses: Mutex<HashMap<LicenseId, License>>,
    clock: Arc<dyn Clock>,
}

impl LicenseStore {
    /// Creates an empty store that reads time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            licenses: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Issues a new license of `kind` lasting `magnitude` days or uses.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidMagnitude`] if `magnitude <= 0`.
    pub fn issue(&self, kind: LicenseKind, magnitude: i64) -> LicenseResult<License> {
        let license = License::new(kind, magnitude, self.clock.now()).inspect_err(|e| {
            warn!("Rejected license request: {}", e);
        })?;
        self.lock().insert(license.id(), license.clone());
        info!("Issued {} license {}", kind, license.id());
        Ok(license)
    }

    /// Returns the license if it is currently usable. Has no side effects.
    ///
    /// # Errors
    ///
    /// [`LicenseError::NotFound`], [`LicenseError::Expired`] or
    /// [`LicenseError::Exhausted`].
    pub fn validate(&self, id: LicenseId) -> LicenseResult<License> {
        let now = self.clock.now();
        let licenses = self.lock();
        let license = licenses.get(&id).ok_or(LicenseError::NotFound(id))?;
        license.check(now).inspect_err(|e| warn!("License validation failed: {}", e))?;
        Ok(license.clone())
    }

    /// Spends one use of a usage-limited license; no-op for time-bound ones.
    ///
    /// Validity is re-checked under the lock, so when two callers race for
    /// the last use exactly one succeeds and the other gets
    /// [`LicenseError::Exhausted`]. Returns the updated record.
    pub fn consume_use(&self, id: LicenseId) -> LicenseResult<License> {
        let mut licenses = self.lock();
        let license = licenses.get_mut(&id).ok_or(LicenseError::NotFound(id))?;
        if license.kind() == LicenseKind::UsageLimited {
            if license.remaining_uses().unwrap_or(0) == 0 {
                warn!("License {} has no uses left to spend", id);
                return Err(LicenseError::Exhausted(id));
            }
            license.spend();
            debug!(
                "Spent one use of license {} ({} left)",
                id,
                license.remaining_uses().unwrap_or(0)
            );
        }
        Ok(license.clone())
    }

    /// Returns a snapshot of every license, ordered by id.
    pub fn list(&self) -> Vec<License> {
        let mut all: Vec<License> = self.lock().values().cloned().collect();
        all.sort_by_key(License::id);
        all
    }

    /// Number of licenses issued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no license has been issued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<LicenseId, License>> {
        self.licenses.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for LicenseStore {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for LicenseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseStore")
            .field("licenses", &self.len())
            .finish()
    }
}
