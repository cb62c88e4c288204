//! Vault configuration.

use chrono::Duration;
use std::path::PathBuf;

/// Default output directory for encrypted and decrypted artifacts.
pub const DEFAULT_OUTPUT_DIR: &str = "./encrypted_files";

/// Default base URL embedded in share links.
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Settings for a [`Vault`](crate::Vault).
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Directory holding `.enc` artifacts and `.dec` copies.
    pub output_dir: PathBuf,
    /// Lifetime of share links when the caller does not pick one.
    pub default_link_ttl: Duration,
    /// Scheme, host and port that share URLs point at.
    pub public_base_url: String,
}

impl VaultConfig {
    /// Default settings with a different output directory.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            default_link_ttl: Duration::hours(1),
            public_base_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}
