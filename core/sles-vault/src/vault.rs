//! The vault facade: license-gated encrypt, decrypt and share.

use crate::config::VaultConfig;
use crate::error::{VaultError, VaultResult};
use crate::link::{SecureLink, ShareLink};
use crate::registry::{ArtifactBinding, BindingRegistry};
use chrono::Duration;
use sles_crypto::{CryptoResult, DerivedKey, decrypt_stream, encrypt_stream};
use sles_license::{License, LicenseKind, LicenseStore};
use sles_types::{ArtifactName, Clock, LicenseId, SystemClock};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Seek};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// An artifact written by [`Vault::encrypt_artifact`].
#[derive(Debug)]
pub struct EncryptedArtifact {
    /// Stored name, e.g. `report.enc`.
    pub name: ArtifactName,
    /// License the artifact is now bound to.
    pub license_id: LicenseId,
    /// Location in the output directory.
    pub path: PathBuf,
    /// Ciphertext size in bytes, IV included.
    pub size: u64,
    /// The ciphertext just written, positioned at its start. Unaffected by
    /// any later write to the same name.
    pub file: File,
}

/// A decrypted copy written by [`Vault::decrypt_artifact`].
#[derive(Debug)]
pub struct DecryptedArtifact {
    /// The artifact that was decrypted.
    pub artifact: ArtifactName,
    /// Name of the decrypted copy, e.g. `report.dec`.
    pub file_name: String,
    /// Location in the output directory.
    pub path: PathBuf,
    /// Plaintext size in bytes, zero fill included.
    pub size: u64,
    /// The plaintext just written, positioned at its start.
    pub file: File,
}

/// License-gated artifact store over one output directory.
///
/// All state except the files themselves is in memory and lost on drop.
/// `Vault` is `Send + Sync`; share it behind an `Arc`.
pub struct Vault {
    config: VaultConfig,
    licenses: LicenseStore,
    bindings: BindingRegistry,
    clock: Arc<dyn Clock>,
}

impl Vault {
    /// Opens a vault on the system clock, creating the output directory if
    /// needed.
    pub fn open(config: VaultConfig) -> VaultResult<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    /// Opens a vault that reads time from `clock`.
    pub fn open_with_clock(config: VaultConfig, clock: Arc<dyn Clock>) -> VaultResult<Self> {
        fs::create_dir_all(&config.output_dir)?;
        info!("Vault output directory: {}", config.output_dir.display());
        Ok(Self {
            licenses: LicenseStore::new(Arc::clone(&clock)),
            bindings: BindingRegistry::new(),
            config,
            clock,
        })
    }

    /// Returns the vault's configuration.
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    // ── Licenses ─────────────────────────────────────────────────

    /// Issues a license of `kind` lasting `magnitude` days or uses.
    pub fn create_license(&self, kind: LicenseKind, magnitude: i64) -> VaultResult<License> {
        Ok(self.licenses.issue(kind, magnitude)?)
    }

    /// Returns the license if it is currently usable.
    pub fn validate_license(&self, license_id: LicenseId) -> VaultResult<License> {
        Ok(self.licenses.validate(license_id)?)
    }

    /// Snapshot of every issued license.
    pub fn list_licenses(&self) -> Vec<License> {
        self.licenses.list()
    }

    /// Snapshot of every artifact binding.
    pub fn list_artifacts(&self) -> Vec<ArtifactBinding> {
        self.bindings.list()
    }

    /// Path of an artifact inside the output directory.
    pub fn artifact_path(&self, artifact: &ArtifactName) -> PathBuf {
        self.config.output_dir.join(artifact.as_str())
    }

    // ── Encrypt / decrypt ────────────────────────────────────────

    /// Encrypts `reader` under `license_id` and stores it as
    /// `original_name` with its extension replaced by `.enc`.
    ///
    /// On success the artifact is bound to `license_id`, replacing any
    /// earlier binding for the same name, and a usage-limited license loses
    /// one use.
    pub fn encrypt_artifact<R: Read>(
        &self,
        license_id: LicenseId,
        original_name: &str,
        reader: R,
    ) -> VaultResult<EncryptedArtifact> {
        let name = ArtifactName::for_upload(original_name)?;
        self.licenses.validate(license_id)?;

        let key = DerivedKey::for_license(&license_id);
        let path = self.artifact_path(&name);
        let (size, file) = self.write_spending_use(license_id, &path, |out| {
            encrypt_stream(&key, reader, out)
        })?;
        self.bindings.bind(name.clone(), license_id);

        info!("Encrypted {} with license {} ({} bytes)", name, license_id, size);
        Ok(EncryptedArtifact {
            name,
            license_id,
            path,
            size,
            file,
        })
    }

    /// Decrypts `artifact` into a `.dec` copy beside it.
    ///
    /// `license_id` must be valid *and* be the license the artifact is bound
    /// to. Zero fill added at encryption time is not removed.
    pub fn decrypt_artifact(
        &self,
        license_id: LicenseId,
        artifact: &ArtifactName,
    ) -> VaultResult<DecryptedArtifact> {
        self.licenses.validate(license_id)?;
        self.bindings.authorize(artifact, license_id)?;

        let source = File::open(self.artifact_path(artifact)).inspect_err(|e| {
            warn!("Unable to open encrypted artifact {}: {}", artifact, e);
        })?;
        let key = DerivedKey::for_license(&license_id);
        let file_name = artifact.decrypted_name();
        let path = self.config.output_dir.join(&file_name);
        let (size, file) = self.write_spending_use(license_id, &path, |out| {
            decrypt_stream(&key, BufReader::new(source), out)
        })?;

        info!("Decrypted {} with license {} ({} bytes)", artifact, license_id, size);
        Ok(DecryptedArtifact {
            artifact: artifact.clone(),
            file_name,
            path,
            size,
            file,
        })
    }

    // ── Share links ──────────────────────────────────────────────

    /// Mints a link to `artifact` valid for `ttl`, or the configured default.
    ///
    /// Only the license is checked here; the binding is checked when the
    /// link is redeemed.
    pub fn issue_share_link(
        &self,
        license_id: LicenseId,
        artifact: ArtifactName,
        ttl: Option<Duration>,
    ) -> VaultResult<ShareLink> {
        let ttl = ttl.unwrap_or(self.config.default_link_ttl);
        if ttl <= Duration::zero() {
            return Err(VaultError::InvalidArgument(format!(
                "link lifetime must be positive, got {}s",
                ttl.num_seconds()
            )));
        }
        self.licenses.validate(license_id)?;

        let expires_at = self
            .clock
            .now()
            .checked_add_signed(ttl)
            .ok_or_else(|| VaultError::InvalidArgument("link lifetime too large".to_string()))?;
        let link = SecureLink::new(license_id, artifact, expires_at);
        let share = ShareLink::new(link, &self.config.public_base_url)?;

        info!(
            "Issued share link for {} with license {} (expires {})",
            share.link.artifact, license_id, share.link.expires_at
        );
        Ok(share)
    }

    /// Redeems a share token: checks its expiry, then decrypts exactly as
    /// [`decrypt_artifact`](Self::decrypt_artifact) would.
    pub fn redeem_share_link(&self, token: &str) -> VaultResult<DecryptedArtifact> {
        let link = SecureLink::parse_token(token)?;
        if link.is_expired(self.clock.now()) {
            warn!("Rejected expired share link for {}", link.artifact);
            return Err(VaultError::LinkExpired {
                expired_at: link.expires_at,
            });
        }
        self.decrypt_artifact(link.license_id, &link.artifact)
    }

    /// Runs `cipher` into a temporary file, spends one use of `license_id`,
    /// then moves the file to `dest`. Any failure leaves `dest` untouched
    /// and the license unspent.
    ///
    /// Returns the byte count and the moved file, rewound for reading.
    fn write_spending_use<F>(
        &self,
        license_id: LicenseId,
        dest: &Path,
        cipher: F,
    ) -> VaultResult<(u64, File)>
    where
        F: FnOnce(BufWriter<&mut File>) -> CryptoResult<u64>,
    {
        let mut staged = NamedTempFile::new_in(&self.config.output_dir)?;
        let written = cipher(BufWriter::new(staged.as_file_mut()))?;
        self.licenses.consume_use(license_id)?;
        let mut file = staged.persist(dest).map_err(|e| e.error)?;
        file.rewind()?;
        Ok((written, file))
    }
}

impl std::fmt::Debug for Vault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("config", &self.config)
            .field("licenses", &self.licenses)
            .finish_non_exhaustive()
    }
}
