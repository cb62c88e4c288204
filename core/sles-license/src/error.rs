//! Error types for the licensing module.

use chrono::{DateTime, Utc};
use sles_types::LicenseId;
use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// License kind is neither `time-bound` nor `usage-limited`.
    #[error("unsupported license type {0:?}: specify 'time-bound' or 'usage-limited'")]
    UnsupportedKind(String),

    /// Days or use count was zero, negative, or out of range.
    #[error("invalid expiry {0}: provide a positive number of days or uses")]
    InvalidMagnitude(i64),

    /// No license with this id exists.
    #[error("license {0} does not exist")]
    NotFound(LicenseId),

    /// Time-bound license is past its expiry.
    #[error("license {id} expired on {expired_at}")]
    Expired {
        id: LicenseId,
        expired_at: DateTime<Utc>,
    },

    /// Usage-limited license has no uses left.
    #[error("license {0} has no remaining uses")]
    Exhausted(LicenseId),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
