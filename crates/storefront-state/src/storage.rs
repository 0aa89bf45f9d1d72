//! # Snapshot Storage
//!
//! A small key-value interface for persisted snapshots, with a file-backed
//! implementation for real sessions and an in-memory one for tests.
//!
//! ## File Layout
//! ```text
//! <data dir>/
//! ├── storefront-auth.json        ◄─── one file per key
//! └── .storefront-auth.json.tmp   ◄─── only exists mid-write
//! ```
//!
//! Writes go to the temp file first and are renamed over the target, so a
//! reader sees either the old snapshot or the new one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::error::{StateError, StateResult};

/// Key-value storage for serialized snapshots.
pub trait SnapshotStorage {
    /// Reads the value for `key`; `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> StateResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> StateResult<()>;

    /// Deletes `key`; deleting an absent key succeeds.
    fn remove(&self, key: &str) -> StateResult<()>;
}

// =============================================================================
// File Storage
// =============================================================================

/// One JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for snapshot files. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> StateResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl SnapshotStorage for FileStorage {
    fn read(&self, key: &str) -> StateResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> StateResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        if let Err(e) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            // Best effort; the original error is the one worth reporting
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(?path, bytes = value.len(), "snapshot written");
        Ok(())
    }

    fn remove(&self, key: &str) -> StateResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys become file names: letters, digits, `-`, `_` and `.` only, and not
/// starting with a dot.
fn validate_key(key: &str) -> StateResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StateError::InvalidKey(key.to_string()))
    }
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-memory storage. Clones share the same entries, so a test can keep a
/// handle and inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn read(&self, key: &str) -> StateResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StateResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StateResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert_eq!(storage.read("app-auth").unwrap(), None);

        storage.write("app-auth", r#"{"a":1}"#).unwrap();
        assert_eq!(storage.read("app-auth").unwrap().as_deref(), Some(r#"{"a":1}"#));
        assert!(dir.path().join("nested/app-auth.json").exists());
        assert!(!dir.path().join("nested/.app-auth.json.tmp").exists());

        storage.write("app-auth", r#"{"a":2}"#).unwrap();
        assert_eq!(storage.read("app-auth").unwrap().as_deref(), Some(r#"{"a":2}"#));

        storage.remove("app-auth").unwrap();
        storage.remove("app-auth").unwrap();
        assert_eq!(storage.read("app-auth").unwrap(), None);
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // a directory where the snapshot file should go makes the rename fail
        fs::create_dir(dir.path().join("app-auth.json")).unwrap();

        assert!(matches!(storage.write("app-auth", "{}"), Err(StateError::Io(_))));
        assert!(!dir.path().join(".app-auth.json.tmp").exists());
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(storage.write(key, "x"), Err(StateError::InvalidKey(_))),
                "{key}"
            );
        }
        assert!(storage.path_for("storefront-auth").is_ok());
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();

        storage.write("k", "v").unwrap();
        assert_eq!(handle.read("k").unwrap().as_deref(), Some("v"));
        assert_eq!(handle.len(), 1);

        handle.remove("k").unwrap();
        assert!(storage.is_empty());
    }
}
