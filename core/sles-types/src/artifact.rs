//! Artifact naming.
//!
//! An artifact is addressed by its stored file name inside the output
//! directory. Uploads are renamed by replacing their extension with
//! [`ENCRYPTED_EXTENSION`]; decrypted copies replace it with
//! [`DECRYPTED_EXTENSION`].

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Extension given to encrypted artifacts.
pub const ENCRYPTED_EXTENSION: &str = "enc";

/// Extension given to decrypted copies of artifacts.
pub const DECRYPTED_EXTENSION: &str = "dec";

/// A bare file name identifying an artifact in the output directory.
///
/// Never contains a path separator and is never `.` or `..`, so joining it
/// onto the output directory cannot escape that directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Validates an existing artifact name, e.g. `report.enc`.
    pub fn parse(name: &str) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidArtifactName("name is empty".to_string()));
        }
        if name == "." || name == ".." {
            return Err(Error::InvalidArtifactName(format!("{name:?} is not a file name")));
        }
        if name.contains(['/', '\\', '\0']) {
            return Err(Error::InvalidArtifactName(format!(
                "{name:?} must not contain path separators"
            )));
        }
        Ok(Self(name.to_string()))
    }

    /// Derives the stored artifact name for an uploaded file: directory
    /// components are dropped and the extension is replaced with `.enc`.
    ///
    /// `notes.txt` becomes `notes.enc`, `archive.tar.gz` becomes
    /// `archive.tar.enc`.
    pub fn for_upload(original_name: &str) -> Result<Self> {
        let base = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_name);
        if base.is_empty() {
            return Err(Error::InvalidArtifactName(format!(
                "{original_name:?} has no file name"
            )));
        }
        Self::parse(&with_extension(base, ENCRYPTED_EXTENSION))
    }

    /// Returns the name of the decrypted copy, e.g. `notes.enc` -> `notes.dec`.
    #[must_use]
    pub fn decrypted_name(&self) -> String {
        with_extension(&self.0, DECRYPTED_EXTENSION)
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Replaces everything from the last `.` with `.{ext}`. A leading dot alone
/// does not start an extension.
fn with_extension(name: &str, ext: &str) -> String {
    let stem = match name.rfind('.') {
        Some(idx) if idx > 0 => &name[..idx],
        _ => name,
    };
    format!("{stem}.{ext}")
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ArtifactName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ArtifactName> for String {
    fn from(name: ArtifactName) -> Self {
        name.0
    }
}
