//! Time-boxed share links.
//!
//! A link is a self-describing token: `base64url(JSON)` of the license id,
//! artifact name and expiry (whole Unix seconds). Nothing is stored server
//! side, so links cannot be revoked, and the token carries no MAC.

use crate::error::{VaultError, VaultResult};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use sles_types::{ArtifactName, LicenseId};

/// Route that redeems share tokens, relative to the public base URL.
pub const SHARE_PATH: &str = "/sles/api/v1/secure-file";

/// The capability embedded in a share token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecureLink {
    pub license_id: LicenseId,
    pub artifact: ArtifactName,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
}

impl SecureLink {
    /// Creates a link. The expiry is truncated to whole seconds so it
    /// survives a token round trip unchanged.
    pub fn new(license_id: LicenseId, artifact: ArtifactName, expires_at: DateTime<Utc>) -> Self {
        Self {
            license_id,
            artifact,
            expires_at: expires_at.trunc_subsecs(0),
        }
    }

    /// True once `now` reaches the expiry.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Encodes the link as an opaque, URL-safe token.
    pub fn to_token(&self) -> VaultResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| VaultError::InvalidArgument(format!("unencodable link: {e}")))?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decodes a token produced by [`to_token`](Self::to_token).
    ///
    /// # Errors
    ///
    /// [`VaultError::InvalidArgument`] if the token is not valid base64url
    /// JSON with the expected fields.
    pub fn parse_token(token: &str) -> VaultResult<Self> {
        let json = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|e| VaultError::InvalidArgument(format!("invalid link token: {e}")))?;
        serde_json::from_slice(&json)
            .map_err(|e| VaultError::InvalidArgument(format!("invalid link payload: {e}")))
    }
}

/// A freshly issued link, ready to hand to a caller.
#[derive(Debug, Clone, Serialize)]
pub struct ShareLink {
    pub link: SecureLink,
    pub token: String,
    pub url: String,
}

impl ShareLink {
    pub(crate) fn new(link: SecureLink, public_base_url: &str) -> VaultResult<Self> {
        let token = link.to_token()?;
        let url = format!(
            "{}{}?token={}",
            public_base_url.trim_end_matches('/'),
            SHARE_PATH,
            token
        );
        Ok(Self { link, token, url })
    }
}
