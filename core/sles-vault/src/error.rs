//! Error taxonomy for vault operations.
//!
//! None of these are transient: the transport layer maps each
//! [`ErrorKind`] to a response and never retries.

use chrono::{DateTime, Utc};
use sles_crypto::CryptoError;
use sles_license::LicenseError;
use sles_types::{ArtifactName, LicenseId};
use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors returned by [`Vault`](crate::Vault).
#[derive(Debug, Error)]
pub enum VaultError {
    /// Bad license kind or magnitude, malformed id, name or token.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No license with this id exists.
    #[error("license {0} does not exist")]
    LicenseNotFound(LicenseId),

    /// Time-bound license is past its expiry.
    #[error("license {id} expired on {expired_at}")]
    LicenseExpired {
        id: LicenseId,
        expired_at: DateTime<Utc>,
    },

    /// Share link is past its expiry.
    #[error("link expired on {expired_at}, please request a new one")]
    LinkExpired { expired_at: DateTime<Utc> },

    /// Usage-limited license has no uses left.
    #[error("license {0} has no remaining uses")]
    Exhausted(LicenseId),

    /// The license did not encrypt this artifact.
    #[error("license {license_id} cannot decrypt {artifact}")]
    AccessDenied {
        license_id: LicenseId,
        artifact: ArtifactName,
    },

    /// Reading or writing an artifact failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of a [`VaultError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    Expired,
    Exhausted,
    AccessDenied,
    Io,
}

impl VaultError {
    /// Returns the error's kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::LicenseNotFound(_) => ErrorKind::NotFound,
            Self::LicenseExpired { .. } | Self::LinkExpired { .. } => ErrorKind::Expired,
            Self::Exhausted(_) => ErrorKind::Exhausted,
            Self::AccessDenied { .. } => ErrorKind::AccessDenied,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<LicenseError> for VaultError {
    fn from(err: LicenseError) -> Self {
        match err {
            LicenseError::UnsupportedKind(_) | LicenseError::InvalidMagnitude(_) => {
                Self::InvalidArgument(err.to_string())
            }
            LicenseError::NotFound(id) => Self::LicenseNotFound(id),
            LicenseError::Expired { id, expired_at } => Self::LicenseExpired { id, expired_at },
            LicenseError::Exhausted(id) => Self::Exhausted(id),
        }
    }
}

impl From<CryptoError> for VaultError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Io(e) => Self::Io(e),
            other => Self::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, other)),
        }
    }
}

impl From<sles_types::Error> for VaultError {
    fn from(err: sles_types::Error) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
