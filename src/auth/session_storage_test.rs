use super::*;
use serde_json::json;

/// A storage rooted in its own temp directory, removed on drop.
struct Scratch {
    dir: std::path::PathBuf,
    storage: SessionStorage,
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn scratch(name: &str) -> Scratch {
    let dir = std::env::temp_dir().join(format!("goodsale-session-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    let storage = SessionStorage::new(dir.join("nested").join("session.json"));
    Scratch { dir, storage }
}

fn user() -> User {
    serde_json::from_value(json!({"id": "u-1", "username": "somchai"})).unwrap()
}

#[test]
fn load_missing_file_is_none() {
    let scratch = scratch("missing");
    let storage = &scratch.storage;
    assert!(!storage.exists());
    assert!(storage.load().unwrap().is_none());
}

#[test]
fn save_then_load_restores_session() {
    let scratch = scratch("roundtrip");
    let storage = &scratch.storage;
    let session = StoredSession::new("http://pos.local/api", Some("sid=abc".into()), Some(user()));
    storage.save(&session).unwrap();
    assert!(storage.exists());
    assert_eq!(storage.load().unwrap(), Some(session));
}

#[test]
fn clear_removes_file_and_is_idempotent() {
    let scratch = scratch("clear");
    let storage = &scratch.storage;
    storage
        .save(&StoredSession::new("http://pos.local/api", None, None))
        .unwrap();
    storage.clear().unwrap();
    assert!(!storage.exists());
    storage.clear().unwrap();
}

#[test]
fn corrupt_file_is_an_error() {
    let scratch = scratch("corrupt");
    let storage = &scratch.storage;
    fs::create_dir_all(storage.path().parent().unwrap()).unwrap();
    fs::write(storage.path(), "{not json").unwrap();
    assert!(storage.load().is_err());
}

#[test]
fn matches_ignores_trailing_slash() {
    let session = StoredSession::new("http://pos.local/api/", None, None);
    assert!(session.matches("http://pos.local/api"));
    assert!(!session.matches("http://other.local/api"));
}

#[test]
fn scratch_dir_is_removed_on_drop() {
    let scratch = scratch("cleanup");
    let dir = scratch.dir.clone();
    scratch
        .storage
        .save(&StoredSession::new("http://pos.local/api", None, None))
        .unwrap();
    assert!(dir.exists());
    drop(scratch);
    assert!(!dir.exists());
}
