//! License-keyed streaming file encryption.
//!
//! # Key derivation
//!
//! The 256-bit AES key is `SHA-256(license id bytes)`. The same license
//! always yields the same key, so no key store is needed; the flip side is
//! that anyone holding the license id can derive the key.
//!
//! # Format
//!
//! ```text
//! +-----------+-------------------------------------------+
//! | IV (16 B) | AES-256-CBC ciphertext, 16-byte blocks    |
//! +-----------+-------------------------------------------+
//! ```
//!
//! The last plaintext block is zero-filled to 16 bytes before encryption.
//! Original length is not recorded, so decryption of a non-aligned input
//! returns the plaintext followed by the fill bytes.
//!
//! Both directions stream one block at a time; memory use does not depend
//! on input size.

mod cipher;
mod error;
mod key;

pub use cipher::{
    BLOCK_SIZE, IV_SIZE, decrypt, decrypt_stream, encrypt, encrypt_stream, encrypt_stream_with_iv,
    encrypted_len,
};
pub use error::{CryptoError, CryptoResult};
pub use key::{DerivedKey, KEY_SIZE};
