//! Core type definitions for the secure license encryption service.
//!
//! This crate defines the identifiers shared by every layer:
//! - License identifiers (UUID v4, also the source of cipher key material)
//! - Artifact names (the stored file names of encrypted artifacts)
//! - A swappable wall clock, so expiry can be tested without sleeping

mod artifact;
mod clock;
mod ids;

pub use artifact::{ArtifactName, DECRYPTED_EXTENSION, ENCRYPTED_EXTENSION};
pub use clock::{Clock, ManualClock, SystemClock};
pub use ids::LicenseId;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid license id: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid artifact name: {0}")]
    InvalidArtifactName(String),
}
