//! Key-value preference storage.
//!
//! The page persists exactly one value (the theme flag), but the store is a
//! plain string map so hosts can back it with whatever they have: an
//! in-memory map for tests and simulations, or a JSON file for the CLI.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read preferences '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write preferences '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences file '{path}' is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preference storage is disabled")]
    Disabled,
}

/// Persisted string settings.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store.
///
/// Clones share the same map, so a test can keep a handle and inspect what
/// the page persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }

    /// Read without going through the fallible trait API.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.peek(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that refuses every operation, like a browser with storage blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStore;

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Disabled)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }
}

/// JSON-object file store. Every `set` rewrites the whole file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data dir>/folio/preferences.json`, or the current directory when the
    /// platform has no data dir.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("folio").join("preferences.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let write_err = |e: std::io::Error| StorageError::Write {
            path: self.path.clone(),
            source: e,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let mut handle = store.clone();
        handle.set("theme", "light").unwrap();
        assert_eq!(store.peek("theme").as_deref(), Some("light"));
    }

    #[test]
    fn disabled_store_rejects_everything() {
        let mut store = DisabledStore;
        assert!(matches!(store.get("theme"), Err(StorageError::Disabled)));
        assert!(matches!(store.set("theme", "dark"), Err(StorageError::Disabled)));
    }

    #[test]
    fn file_store_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn file_store_round_trips_and_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let mut store = FileStore::new(path.clone());
        store.set("theme", "light").unwrap();
        store.set("other", "x").unwrap();

        let reopened = FileStore::new(path);
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();
        let store = FileStore::new(path);
        assert!(matches!(store.get("theme"), Err(StorageError::Corrupt { .. })));
    }
}
