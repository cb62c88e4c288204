//! License-gated artifact encryption.
//!
//! [`Vault`] is the entry point the transport layer calls. It ties together:
//! - the [`LicenseStore`](sles_license::LicenseStore) that decides whether a
//!   license may be used and spends usage-limited licenses
//! - the streaming cipher in `sles-crypto`
//! - a [`BindingRegistry`] recording which license encrypted each artifact;
//!   only that license may decrypt it
//! - [`SecureLink`] capabilities that re-enter the decrypt path until they
//!   expire
//!
//! # Ordering
//!
//! Every operation validates first (argument, license, binding) and only then
//! touches the filesystem. Cipher output goes to a temporary file in the
//! output directory; a use is spent only after the cipher finishes, and the
//! file is moved into place only after the use is spent.
//!
//! # Known weaknesses
//!
//! The cipher key is derived from the license id alone, and link tokens are
//! not signed: anyone who knows a license id can derive its key or mint a
//! token for it. Both are kept as-is for compatibility with existing
//! artifacts and links.
//!
//! Two concurrent encryptions under the same stored name race: the file that
//! lands last and the binding written last may come from different requests.

mod config;
mod error;
mod link;
mod registry;
mod vault;

pub use config::VaultConfig;
pub use error::{ErrorKind, VaultError, VaultResult};
pub use link::{SHARE_PATH, SecureLink, ShareLink};
pub use registry::{ArtifactBinding, BindingRegistry};
pub use vault::{DecryptedArtifact, EncryptedArtifact, Vault};
