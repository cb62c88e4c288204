//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur while encrypting or decrypting a stream.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Reading the source or writing the destination failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ciphertext is shorter than the IV.
    #[error("ciphertext truncated: {actual} bytes, need at least {expected} for the IV")]
    MissingIv { expected: usize, actual: usize },

    /// Ciphertext body is not a whole number of blocks.
    #[error("ciphertext body is {len} bytes, not a multiple of the {block_size}-byte block")]
    PartialBlock { len: u64, block_size: usize },
}
