use chrono::Utc;
use sles_license::LicenseError;
use sles_types::LicenseId;

#[test]
fn error_display_unsupported_kind() {
    let err = LicenseError::UnsupportedKind("time".into());
    let msg = format!("{err}");
    assert!(msg.contains("unsupported license type"));
    assert!(msg.contains("time-bound"));
}

#[test]
fn error_display_invalid_magnitude() {
    let err = LicenseError::InvalidMagnitude(-1);
    assert!(format!("{err}").contains("-1"));
}

#[test]
fn error_display_not_found() {
    let id = LicenseId::new();
    let err = LicenseError::NotFound(id);
    assert!(format!("{err}").contains(&id.to_string()));
}

#[test]
fn error_display_expired() {
    let err = LicenseError::Expired {
        id: LicenseId::new(),
        expired_at: Utc::now(),
    };
    assert!(format!("{err}").contains("expired"));
}

#[test]
fn error_display_exhausted() {
    let err = LicenseError::Exhausted(LicenseId::new());
    assert!(format!("{err}").contains("no remaining uses"));
}
