//! Artifact-to-license bindings.

use crate::error::{VaultError, VaultResult};
use serde::{Deserialize, Serialize};
use sles_types::{ArtifactName, LicenseId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// One artifact and the license that encrypted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactBinding {
    pub artifact: ArtifactName,
    pub license_id: LicenseId,
}

/// Records which license produced each encrypted artifact.
///
/// At most one license is bound per artifact name; re-encrypting under the
/// same name rebinds it to the newer license.
#[derive(Debug, Default)]
pub struct BindingRegistry {
    bindings: Mutex<HashMap<ArtifactName, LicenseId>>,
}

impl BindingRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `artifact` to `license_id`, returning the license it replaced.
    pub fn bind(&self, artifact: ArtifactName, license_id: LicenseId) -> Option<LicenseId> {
        let previous = self.lock().insert(artifact.clone(), license_id);
        if let Some(previous) = previous.filter(|p| *p != license_id) {
            debug!("Rebound {} from license {} to {}", artifact, previous, license_id);
        }
        previous
    }

    /// Returns the license bound to `artifact`, if any.
    pub fn bound_license(&self, artifact: &ArtifactName) -> Option<LicenseId> {
        self.lock().get(artifact).copied()
    }

    /// Succeeds only if `license_id` is exactly the license bound to
    /// `artifact`. An unbound artifact denies every license.
    pub fn authorize(&self, artifact: &ArtifactName, license_id: LicenseId) -> VaultResult<()> {
        if self.bound_license(artifact) == Some(license_id) {
            Ok(())
        } else {
            warn!("License {} is not bound to {}", license_id, artifact);
            Err(VaultError::AccessDenied {
                license_id,
                artifact: artifact.clone(),
            })
        }
    }

    /// Returns a snapshot of every binding, ordered by artifact name.
    pub fn list(&self) -> Vec<ArtifactBinding> {
        let mut all: Vec<ArtifactBinding> = self
            .lock()
            .iter()
            .map(|(artifact, license_id)| ArtifactBinding {
                artifact: artifact.clone(),
                license_id: *license_id,
            })
            .collect();
        all.sort_by(|a, b| a.artifact.cmp(&b.artifact));
        all
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ArtifactName, LicenseId>> {
        self.bindings.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
