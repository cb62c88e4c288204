//! License records and their validity rules.

use crate::error::{LicenseError, LicenseResult};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sles_types::LicenseId;
use std::fmt;
use std::str::FromStr;

/// The kind of license.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseKind {
    /// Valid until an absolute expiry timestamp.
    TimeBound,
    /// Valid while the use counter is above zero.
    UsageLimited,
}

impl LicenseKind {
    /// Returns the wire name, `time-bound` or `usage-limited`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeBound => "time-bound",
            Self::UsageLimited => "usage-limited",
        }
    }
}

impl fmt::Display for LicenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseKind {
    type Err = LicenseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time-bound" => Ok(Self::TimeBound),
            "usage-limited" => Ok(Self::UsageLimited),
            _ => Err(LicenseError::UnsupportedKind(s.to_string())),
        }
    }
}

/// A license record.
///
/// Exactly one of `expires_at` (time-bound) or `remaining_uses`
/// (usage-limited) is set, according to `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    id: LicenseId,
    kind: LicenseKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    remaining_uses: Option<u32>,
}

impl License {
    /// Builds a fresh license of `kind` with `magnitude` days or uses,
    /// counted from `now`.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidMagnitude`] if `magnitude <= 0` or the
    /// resulting expiry / counter does not fit.
    pub fn new(kind: LicenseKind, magnitude: i64, now: DateTime<Utc>) -> LicenseResult<Self> {
        if magnitude <= 0 {
            return Err(LicenseError::InvalidMagnitude(magnitude));
        }
        let id = LicenseId::new();
        match kind {
            LicenseKind::TimeBound => {
                let expires_at = Duration::try_days(magnitude)
                    .and_then(|d| now.checked_add_signed(d))
                    .ok_or(LicenseError::InvalidMagnitude(magnitude))?;
                Ok(Self {
                    id,
                    kind,
                    expires_at: Some(expires_at),
                    remaining_uses: None,
                })
            }
            LicenseKind::UsageLimited => {
                let uses = u32::try_from(magnitude)
                    .map_err(|_| LicenseError::InvalidMagnitude(magnitude))?;
                Ok(Self {
                    id,
                    kind,
                    expires_at: None,
                    remaining_uses: Some(uses),
                })
            }
        }
    }

    /// Returns the license id.
    #[must_use]
    pub fn id(&self) -> LicenseId {
        self.id
    }

    /// Returns the license kind.
    #[must_use]
    pub fn kind(&self) -> LicenseKind {
        self.kind
    }

    /// Returns the expiry of a time-bound license.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Returns the remaining uses of a usage-limited license.
    #[must_use]
    pub fn remaining_uses(&self) -> Option<u32> {
        self.remaining_uses
    }

    /// Checks whether the license is usable at `now`.
    ///
    /// A time-bound license stops being valid at the instant of its expiry.
    pub fn check(&self, now: DateTime<Utc>) -> LicenseResult<()> {
        match self.kind {
            LicenseKind::TimeBound => match self.expires_at {
                Some(expired_at) if now >= expired_at => Err(LicenseError::Expired {
                    id: self.id,
                    expired_at,
                }),
                _ => Ok(()),
            },
            LicenseKind::UsageLimited => match self.remaining_uses {
                Some(uses) if uses > 0 => Ok(()),
                _ => Err(LicenseError::Exhausted(self.id)),
            },
        }
    }

    /// Spends one use. No-op for time-bound licenses; never goes below zero.
    pub(crate) fn spend(&mut self) {
        if let Some(uses) = self.remaining_uses.as_mut() {
            *uses = uses.saturating_sub(1);
        }
    }
}
