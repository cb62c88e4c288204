//! Block-streaming AES-256-CBC with zero-fill padding.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes::Aes256;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use std::io::{ErrorKind, Read, Write};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Size of the initialization vector prefix (one block).
pub const IV_SIZE: usize = BLOCK_SIZE;

/// Length of the ciphertext produced for `plaintext_len` input bytes:
/// the IV plus the input rounded up to whole blocks.
#[must_use]
pub fn encrypted_len(plaintext_len: u64) -> u64 {
    let block = BLOCK_SIZE as u64;
    IV_SIZE as u64 + plaintext_len.div_ceil(block) * block
}

/// Encrypts `reader` into `writer` under a fresh random IV.
///
/// Returns the number of bytes written, IV included.
pub fn encrypt_stream<R: Read, W: Write>(
    key: &DerivedKey,
    reader: R,
    writer: W,
) -> CryptoResult<u64> {
    let mut iv = [0u8; IV_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    encrypt_stream_with_iv(key, &iv, reader, writer)
}

/// Encrypts `reader` into `writer` under the given IV.
///
/// Callers must never reuse an IV with the same key; this entry point exists
/// for known-answer tests.
pub fn encrypt_stream_with_iv<R: Read, W: Write>(
    key: &DerivedKey,
    iv: &[u8; IV_SIZE],
    mut reader: R,
    mut writer: W,
) -> CryptoResult<u64> {
    writer.write_all(iv)?;
    let mut written = IV_SIZE as u64;

    let mut encryptor = Aes256CbcEnc::new(key.as_bytes().into(), iv.into());
    let mut buf = [0u8; BLOCK_SIZE];
    loop {
        let filled = read_block(&mut reader, &mut buf)?;
        if filled == 0 {
            break;
        }
        // Zero-fill the tail; the fill is not removable on decryption.
        buf[filled..].fill(0);
        encryptor.encrypt_block_mut(aes::Block::from_mut_slice(&mut buf));
        writer.write_all(&buf)?;
        written += BLOCK_SIZE as u64;
        if filled < BLOCK_SIZE {
            break;
        }
    }
    writer.flush()?;
    Ok(written)
}

/// Decrypts `reader` (IV followed by whole blocks) into `writer`.
///
/// Output is always a multiple of [`BLOCK_SIZE`]; zero fill added at
/// encryption time is returned as-is. Returns the number of bytes written.
pub fn decrypt_stream<R: Read, W: Write>(
    key: &DerivedKey,
    mut reader: R,
    mut writer: W,
) -> CryptoResult<u64> {
    let mut iv = [0u8; IV_SIZE];
    let got = read_block(&mut reader, &mut iv)?;
    if got < IV_SIZE {
        return Err(CryptoError::MissingIv {
            expected: IV_SIZE,
            actual: got,
        });
    }

    let mut decryptor = Aes256CbcDec::new(key.as_bytes().into(), (&iv).into());
    let mut buf = [0u8; BLOCK_SIZE];
    let mut written = 0u64;
    loop {
        let filled = read_block(&mut reader, &mut buf)?;
        if filled == 0 {
            break;
        }
        if filled < BLOCK_SIZE {
            return Err(CryptoError::PartialBlock {
                len: written + filled as u64,
                block_size: BLOCK_SIZE,
            });
        }
        decryptor.decrypt_block_mut(aes::Block::from_mut_slice(&mut buf));
        writer.write_all(&buf)?;
        written += BLOCK_SIZE as u64;
    }
    writer.flush()?;
    Ok(written)
}

/// Encrypts an in-memory buffer.
pub fn encrypt(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(encrypted_len(plaintext.len() as u64) as usize);
    encrypt_stream(key, plaintext, &mut out)?;
    Ok(out)
}

/// Decrypts an in-memory buffer.
pub fn decrypt(key: &DerivedKey, ciphertext: &[u8]) -> CryptoResult<Vec<u8>> {
    let mut out = Vec::with_capacity(ciphertext.len().saturating_sub(IV_SIZE));
    decrypt_stream(key, ciphertext, &mut out)?;
    Ok(out)
}

/// Fills `buf` from `reader`, stopping early only at end of input.
///
/// `Read::read` may return short counts mid-stream, so a single call cannot
/// tell a final partial block from a slow source.
fn read_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> CryptoResult<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(filled)
}
