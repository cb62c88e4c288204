//! Property-based tests for the cipher engine.
//!
//! These properties must hold for every input:
//! - Output length is the IV plus the input rounded up to whole blocks
//! - Block-aligned input decrypts to exactly itself
//! - Non-aligned input decrypts to itself followed by zero fill

use proptest::prelude::*;
use sles_crypto::{BLOCK_SIZE, DerivedKey, decrypt, encrypt, encrypted_len};
use sles_types::LicenseId;

fn license_strategy() -> impl Strategy<Value = LicenseId> {
    prop::array::uniform16(any::<u8>()).prop_map(|b| LicenseId::from_uuid(uuid::Uuid::from_bytes(b)))
}

fn plaintext_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

proptest! {
    #[test]
    fn output_length_matches_formula(id in license_strategy(), plaintext in plaintext_strategy()) {
        let key = DerivedKey::for_license(&id);
        let encrypted = encrypt(&key, &plaintext).unwrap();
        prop_assert_eq!(encrypted.len() as u64, encrypted_len(plaintext.len() as u64));
    }

    #[test]
    fn aligned_roundtrip_is_identity(
        id in license_strategy(),
        blocks in prop::collection::vec(prop::array::uniform16(any::<u8>()), 0..64),
    ) {
        let plaintext: Vec<u8> = blocks.concat();
        let key = DerivedKey::for_license(&id);
        let decrypted = decrypt(&key, &encrypt(&key, &plaintext).unwrap()).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn unaligned_roundtrip_appends_zero_fill(id in license_strategy(), plaintext in plaintext_strategy()) {
        prop_assume!(plaintext.len() % BLOCK_SIZE != 0);
        let key = DerivedKey::for_license(&id);
        let decrypted = decrypt(&key, &encrypt(&key, &plaintext).unwrap()).unwrap();

        let fill = BLOCK_SIZE - plaintext.len() % BLOCK_SIZE;
        prop_assert_eq!(decrypted.len(), plaintext.len() + fill);
        prop_assert_eq!(&decrypted[..plaintext.len()], plaintext.as_slice());
        prop_assert!(decrypted[plaintext.len()..].iter().all(|&b| b == 0));
    }

    #[test]
    fn same_license_same_key(id in license_strategy()) {
        let first = DerivedKey::for_license(&id);
        let second = DerivedKey::for_license(&id);
        prop_assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
