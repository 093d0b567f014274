//! File-backed key-value store.
//!
//! The whole store is one JSON object of string keys to string values, e.g.
//! `{"cart": "[{\"id\":\"wks-001\",\"qty\":2}]"}`, so a cart written by the
//! CLI has exactly the shape the storefront keeps per visitor.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use educart_core::{KeyValueStore, StorageError};

/// Default store location, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = ".educart/storage.json";

/// Key-value store persisted as a JSON object in a single file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`. Nothing is touched until the first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read every entry. A missing file is an empty store.
    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };
        serde_json::from_str(&text).map_err(|e| {
            StorageError::Unavailable(format!("{} is not a JSON object: {e}", self.path.display()))
        })
    }

    /// Write every entry, replacing the file atomically.
    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |e: std::io::Error| StorageError::Io(format!("{}: {e}", self.path.display()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Io(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = match self.read_all() {
            Ok(entries) => entries,
            Err(StorageError::Unavailable(reason)) => {
                tracing::warn!(%reason, "Replacing unreadable store file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }
}
