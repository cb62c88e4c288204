use sles_types::{ArtifactName, LicenseId};
use sles_vault::{BindingRegistry, ErrorKind};

fn name(s: &str) -> ArtifactName {
    ArtifactName::parse(s).unwrap()
}

#[test]
fn bind_then_authorize() {
    let registry = BindingRegistry::new();
    let id = LicenseId::new();
    assert_eq!(registry.bind(name("a.enc"), id), None);
    assert!(registry.authorize(&name("a.enc"), id).is_ok());
    assert_eq!(registry.bound_license(&name("a.enc")), Some(id));
}

#[test]
fn last_write_wins() {
    let registry = BindingRegistry::new();
    let first = LicenseId::new();
    let second = LicenseId::new();
    registry.bind(name("a.enc"), first);
    assert_eq!(registry.bind(name("a.enc"), second), Some(first));

    assert_eq!(
        registry.authorize(&name("a.enc"), first).unwrap_err().kind(),
        ErrorKind::AccessDenied
    );
    assert!(registry.authorize(&name("a.enc"), second).is_ok());
    assert_eq!(registry.list().len(), 1);
}

#[test]
fn unbound_artifact_denies_everyone() {
    let registry = BindingRegistry::new();
    let err = registry.authorize(&name("none.enc"), LicenseId::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    assert!(err.to_string().contains("none.enc"));
}

#[test]
fn list_is_sorted_by_artifact() {
    let registry = BindingRegistry::new();
    for n in ["c.enc", "a.enc", "b.enc"] {
        registry.bind(name(n), LicenseId::new());
    }
    let names: Vec<String> = registry
        .list()
        .into_iter()
        .map(|b| b.artifact.to_string())
        .collect();
    assert_eq!(names, vec!["a.enc", "b.enc", "c.enc"]);
}
