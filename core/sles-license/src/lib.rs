//! License issuance, validation and usage accounting.
//!
//! Two kinds of license gate access to artifacts:
//! - **Time-bound**: valid until an absolute expiry, `days` after issuance
//! - **Usage-limited**: valid while a use counter stays above zero; every
//!   successful encrypt or decrypt spends exactly one use
//!
//! Licenses live in a volatile [`LicenseStore`]. Validation is a pure read;
//! spending a use re-validates under the same lock that decrements, so a
//! usage-limited license can never be spent more times than it allows.

mod error;
mod license;
mod store;

pub use error::{LicenseError, LicenseResult};
pub use license::{License, LicenseKind};
pub use store::LicenseStore;
