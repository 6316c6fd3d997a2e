//! Flat key-value persistence for snippet data
//!
//! A single JSON object file on disk maps string keys to JSON values, with
//! typed `get`/`set`/`remove` on top. Writes go through to disk on every
//! mutation; an in-memory mode (no path) backs tests.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Well-known keys used by the snippet store.
pub const SNIPPETS_KEY: &str = "patchwork-snippets";
pub const COLLECTIONS_KEY: &str = "patchwork-collections";
pub const SETTINGS_KEY: &str = "patchwork-settings";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Thread-safe key-value storage backed by a single JSON file.
pub struct Storage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl Storage {
    /// Open storage at the given path, creating it on first write.
    ///
    /// An unreadable file is discarded with a warning rather than failing
    /// the open; the caller starts from empty state.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    log::warn!(
                        "discarding unreadable storage file {}: {err}",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => return Err(err.into()),
        };

        Ok(Storage {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// Open a storage instance that never touches disk (for testing).
    pub fn in_memory() -> Self {
        Storage {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Read and deserialize the value under `key`, if present.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        let entries = self.entries.lock();
        match entries.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Like [`Storage::get`], but degrades to `default` when the key is
    /// missing or its value does not deserialize.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                log::warn!("failed to read {key} from storage: {err}");
                default
            }
        }
    }

    /// Serialize `value` under `key` and flush to disk.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        self.flush(&entries)
    }

    /// Remove `key` if present and flush to disk.
    pub fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn flush(&self, entries: &BTreeMap<String, serde_json::Value>) -> StorageResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let storage = Storage::in_memory();
        let value: Option<Vec<String>> = storage.get("nothing").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_then_get() {
        let storage = Storage::in_memory();
        storage.set("numbers", &vec![1, 2, 3]).unwrap();
        let value: Option<Vec<i32>> = storage.get("numbers").unwrap();
        assert_eq!(value, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_get_or_falls_back_on_type_mismatch() {
        let storage = Storage::in_memory();
        storage.set("numbers", &"not a list").unwrap();
        let value: Vec<i32> = storage.get_or("numbers", vec![9]);
        assert_eq!(value, vec![9]);
    }

    #[test]
    fn test_remove() {
        let storage = Storage::in_memory();
        storage.set("key", &"value").unwrap();
        storage.remove("key").unwrap();
        let value: Option<String> = storage.get("key").unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_disk_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let storage = Storage::open(&path).unwrap();
        storage.set("greeting", &"hello").unwrap();
        drop(storage);

        let reopened = Storage::open(&path).unwrap();
        let value: Option<String> = reopened.get("greeting").unwrap();
        assert_eq!(value.as_deref(), Some("hello"));
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "not json at all").unwrap();

        let storage = Storage::open(&path).unwrap();
        let value: Option<String> = storage.get("anything").unwrap();
        assert_eq!(value, None);
    }
}
