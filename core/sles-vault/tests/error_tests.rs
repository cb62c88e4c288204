use chrono::Utc;
use sles_crypto::CryptoError;
use sles_license::LicenseError;
use sles_types::{ArtifactName, LicenseId};
use sles_vault::{ErrorKind, VaultError};

#[test]
fn license_errors_map_to_kinds() {
    let id = LicenseId::new();
    let cases = [
        (LicenseError::UnsupportedKind("x".into()), ErrorKind::InvalidArgument),
        (LicenseError::InvalidMagnitude(0), ErrorKind::InvalidArgument),
        (LicenseError::NotFound(id), ErrorKind::NotFound),
        (
            LicenseError::Expired {
                id,
                expired_at: Utc::now(),
            },
            ErrorKind::Expired,
        ),
        (LicenseError::Exhausted(id), ErrorKind::Exhausted),
    ];
    for (err, kind) in cases {
        assert_eq!(VaultError::from(err).kind(), kind);
    }
}

#[test]
fn crypto_errors_are_io() {
    let malformed = VaultError::from(CryptoError::MissingIv {
        expected: 16,
        actual: 0,
    });
    assert_eq!(malformed.kind(), ErrorKind::Io);
    assert!(malformed.to_string().contains("truncated"));

    let io = VaultError::from(CryptoError::Io(std::io::Error::other("eio")));
    assert!(matches!(io, VaultError::Io(_)));
}

#[test]
fn error_display_access_denied() {
    let id = LicenseId::new();
    let err = VaultError::AccessDenied {
        license_id: id,
        artifact: ArtifactName::parse("doc.enc").unwrap(),
    };
    let msg = err.to_string();
    assert!(msg.contains(&id.to_string()));
    assert!(msg.contains("doc.enc"));
}

#[test]
fn error_display_link_expired() {
    let err = VaultError::LinkExpired {
        expired_at: Utc::now(),
    };
    assert!(err.to_string().contains("request a new one"));
    assert_eq!(err.kind(), ErrorKind::Expired);
}
