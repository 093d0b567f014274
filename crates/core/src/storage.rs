//! Key-value storage adapter.
//!
//! The cart persists itself through [`KeyValueStore`], a string-keyed,
//! string-valued store in the spirit of browser local storage. Front ends
//! supply their own backing (a session, a JSON file); [`MemoryStore`] backs
//! tests and ephemeral use.

use std::collections::HashMap;

use thiserror::Error;

/// Errors reported by a [`KeyValueStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store cannot be reached.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The value does not fit in the store.
    #[error("storage quota exceeded: {size} bytes (limit {limit})")]
    QuotaExceeded {
        /// Size of the rejected write.
        size: usize,
        /// Maximum accepted size.
        limit: usize,
    },

    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(String),
}

/// A string key-value store.
///
/// Implementations are synchronous: callers treat reads and writes as
/// instantaneous and decide for themselves whether a failure matters.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write is rejected or fails.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`].
///
/// Supports an optional per-value byte quota and a failing mode so callers can
/// exercise their error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    quota: Option<usize>,
    failing: bool,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects values longer than `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Create a store whose reads and writes all fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Seed a value directly, bypassing quota checks.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: impl Into<String>) -> Self {
        self.values.insert(key.to_owned(), value.into());
        self
    }

    /// Peek at a stored value.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store disabled".to_owned()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if self.failing {
            return Err(StorageError::Unavailable("memory store disabled".to_owned()));
        }
        if let Some(limit) = self.quota.filter(|&limit| value.len() > limit) {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit,
            });
        }
        self.values.insert(key.to_owned(), value);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("cart", "[]".to_owned()).unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
        store.set("cart", "[1]".to_owned()).unwrap();
        assert_eq!(store.raw("cart"), Some("[1]"));
    }

    #[test]
    fn test_quota_rejects_large_values_and_keeps_old() {
        let mut store = MemoryStore::with_quota(4).with_value("cart", "[]");
        let err = store.set("cart", "0123456789".to_owned()).unwrap_err();
        assert_eq!(err, StorageError::QuotaExceeded { size: 10, limit: 4 });
        assert_eq!(store.raw("cart"), Some("[]"));
    }

    #[test]
    fn test_failing_store() {
        let mut store = MemoryStore::failing();
        assert!(store.get("cart").is_err());
        assert!(store.set("cart", "[]".to_owned()).is_err());
    }
}
