//! Tests for the session handle and credential persistence.

use super::*;

#[test]
fn in_memory_session_starts_unauthenticated() {
    let session = Session::in_memory();
    assert!(session.current().is_none());
    assert!(!session.is_authenticated());
}

#[test]
fn current_is_lazily_read_from_persistence() {
    let store = MemoryCredentialStore::with_value("jwt_token", "persisted-token");
    let session = Session::new(store, "jwt_token");
    let credential = session.current().unwrap();
    assert_eq!(credential.token(), "persisted-token");
}

#[test]
fn acquire_is_visible_to_every_clone() {
    let session = Session::in_memory();
    let other = session.clone();

    session.acquire("test-token");
    assert_eq!(other.current().unwrap().token(), "test-token");

    other.clear();
    assert!(session.current().is_none());
}

#[test]
fn empty_persisted_token_is_absent() {
    let store = MemoryCredentialStore::with_value("jwt_token", "");
    let session = Session::new(store, "jwt_token");
    assert!(session.current().is_none());
}

#[test]
fn credential_debug_redacts_token() {
    let credential = Credential::new("super-secret");
    let debug = format!("{credential:?}");
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn file_store_survives_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("credentials.json");

    let session = Session::new(FileCredentialStore::new(&path), "jwt_token");
    session.acquire("abc");
    assert!(path.exists());

    let restarted = Session::new(FileCredentialStore::new(&path), "jwt_token");
    assert_eq!(restarted.current().unwrap().token(), "abc");

    restarted.clear();
    let again = Session::new(FileCredentialStore::new(&path), "jwt_token");
    assert!(again.current().is_none());
}

#[test]
fn file_store_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("credentials.json"));

    store.set("jwt_token", "a").unwrap();
    store.set("other", "b").unwrap();
    store.remove("jwt_token").unwrap();

    assert_eq!(store.get("jwt_token").unwrap(), None);
    assert_eq!(store.get("other").unwrap().as_deref(), Some("b"));
}

#[test]
fn file_store_missing_file_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileCredentialStore::new(dir.path().join("absent.json"));
    assert_eq!(store.get("jwt_token").unwrap(), None);
    store.remove("jwt_token").unwrap();
    assert!(!store.path().exists());
}

#[test]
fn corrupt_file_is_reported_and_session_stays_signed_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    std::fs::write(&path, "not json").unwrap();

    let store = FileCredentialStore::new(&path);
    assert!(matches!(
        store.get("jwt_token"),
        Err(CredentialError::Corrupt(_))
    ));

    let session = Session::new(FileCredentialStore::new(&path), "jwt_token");
    assert!(session.current().is_none());
}

#[test]
fn refresh_rehydrates_from_persistence() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");

    let session = Session::new(FileCredentialStore::new(&path), "jwt_token");
    assert!(session.current().is_none());

    // Another process signs in.
    FileCredentialStore::new(&path)
        .set("jwt_token", "from-elsewhere")
        .unwrap();
    assert!(session.current().is_none());

    let refreshed = session.refresh().unwrap();
    assert_eq!(refreshed.token(), "from-elsewhere");
    assert_eq!(session.current().unwrap().token(), "from-elsewhere");
}

#[cfg(unix)]
#[test]
fn file_store_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credentials.json");
    FileCredentialStore::new(&path).set("jwt_token", "x").unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
