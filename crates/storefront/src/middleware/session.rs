//! Session middleware configuration and session-backed cart storage.
//!
//! Sets up in-memory sessions using tower-sessions and a bounded,
//! expiry-evicting [`CacheSessionStore`]. Each visitor's session is
//! their private key-value store; the cart lives under
//! [`educart_core::CART_STORAGE_KEY`] as the same JSON text a browser would
//! keep in local storage.

use std::collections::{BTreeSet, HashMap};

use educart_core::{KeyValueStore, StorageError};
use tower_sessions::{Expiry, Session, SessionManagerLayer};

use crate::config::StorefrontConfig;
use crate::middleware::session_store::CacheSessionStore;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "educart_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Largest value accepted for a single session key, in bytes.
pub const MAX_SESSION_VALUE_BYTES: usize = 16 * 1024;

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<CacheSessionStore> {
    SessionManagerLayer::new(CacheSessionStore::new(config.max_sessions))
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Request-scoped copy of selected session keys.
///
/// Session access is async, while [`KeyValueStore`] is synchronous: handlers
/// read the keys they need once, work against the snapshot, then
/// [`flush`](Self::flush) whatever was written.
#[derive(Debug, Default)]
pub struct SessionSnapshot {
    values: HashMap<String, String>,
    dirty: BTreeSet<String>,
}

impl SessionSnapshot {
    /// Read `keys` from the session.
    ///
    /// Keys that are missing or fail to load are simply absent from the
    /// snapshot.
    pub async fn load(session: &Session, keys: &[&str]) -> Self {
        let mut values = HashMap::with_capacity(keys.len());
        for &key in keys {
            match session.get::<String>(key).await {
                Ok(Some(value)) => {
                    values.insert(key.to_string(), value);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(key, error = %e, "Failed to read session value"),
            }
        }

        Self {
            values,
            dirty: BTreeSet::new(),
        }
    }

    /// Write every key set since loading back to the session.
    ///
    /// Failures are logged and dropped; the next request rewrites the full
    /// value anyway.
    pub async fn flush(self, session: &Session) {
        for key in &self.dirty {
            let Some(value) = self.values.get(key) else {
                continue;
            };
            if let Err(e) = session.insert(key, value).await {
                tracing::warn!(key = %key, error = %e, "Failed to write session value");
            }
        }
    }

    /// Whether anything was written since loading.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }
}

impl KeyValueStore for SessionSnapshot {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        if value.len() > MAX_SESSION_VALUE_BYTES {
            return Err(StorageError::QuotaExceeded {
                size: value.len(),
                limit: MAX_SESSION_VALUE_BYTES,
            });
        }
        self.values.insert(key.to_string(), value);
        self.dirty.insert(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use educart_core::{CART_STORAGE_KEY, CartManager};

    use super::*;

    #[test]
    fn test_snapshot_tracks_writes() {
        let mut snapshot = SessionSnapshot::default();
        assert!(!snapshot.is_dirty());
        assert_eq!(snapshot.get(CART_STORAGE_KEY).unwrap(), None);

        snapshot.set(CART_STORAGE_KEY, "[]".to_string()).unwrap();
        assert!(snapshot.is_dirty());
        assert_eq!(snapshot.get(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_snapshot_rejects_oversized_values() {
        let mut snapshot = SessionSnapshot::default();
        let big = "x".repeat(MAX_SESSION_VALUE_BYTES + 1);
        let err = snapshot.set(CART_STORAGE_KEY, big).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(!snapshot.is_dirty());
    }

    #[test]
    fn test_cart_manager_over_snapshot() {
        let mut manager = CartManager::load(SessionSnapshot::default());
        manager.add_item("wks-001", 2);
        let snapshot = manager.into_store();
        assert!(snapshot.is_dirty());
        assert_eq!(
            snapshot.get(CART_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"[{"id":"wks-001","qty":2}]"#)
        );
    }
}
