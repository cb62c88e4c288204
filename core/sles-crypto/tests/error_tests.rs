use sles_crypto::CryptoError;

#[test]
fn error_display_io() {
    let err: CryptoError = std::io::Error::other("broken pipe").into();
    let msg = format!("{err}");
    assert!(msg.contains("IO error"));
    assert!(msg.contains("broken pipe"));
}

#[test]
fn error_display_missing_iv() {
    let err = CryptoError::MissingIv {
        expected: 16,
        actual: 3,
    };
    let msg = format!("{err}");
    assert!(msg.contains("16"));
    assert!(msg.contains('3'));
}

#[test]
fn error_display_partial_block() {
    let err = CryptoError::PartialBlock {
        len: 20,
        block_size: 16,
    };
    assert!(format!("{err}").contains("not a multiple"));
}
