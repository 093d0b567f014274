//! In-memory session store with expiry-based eviction.
//!
//! Sessions are kept in a `moka` cache whose per-entry lifetime follows each
//! record's expiry date, so abandoned sessions are dropped instead of
//! accumulating for the life of the process. The cache is also bounded by
//! entry count.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tower_sessions::cookie::time::OffsetDateTime;
use tower_sessions::session::{Id, Record};
use tower_sessions::{SessionStore, session_store};

/// Default upper bound on live sessions.
pub const DEFAULT_MAX_SESSIONS: u64 = 10_000;

/// Expires each cached record at its own `expiry_date`.
struct RecordExpiry;

impl RecordExpiry {
    fn remaining(record: &Record) -> Duration {
        (record.expiry_date - OffsetDateTime::now_utc())
            .try_into()
            .unwrap_or(Duration::ZERO)
    }
}

impl Expiry<Id, Record> for RecordExpiry {
    fn expire_after_create(
        &self,
        _id: &Id,
        record: &Record,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }

    fn expire_after_update(
        &self,
        _id: &Id,
        record: &Record,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(Self::remaining(record))
    }
}

/// Session store backed by a bounded, self-evicting cache.
#[derive(Clone)]
pub struct CacheSessionStore {
    cache: Cache<Id, Record>,
}

impl CacheSessionStore {
    /// Create a store holding at most `max_sessions` sessions.
    #[must_use]
    pub fn new(max_sessions: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_sessions)
            .expire_after(RecordExpiry)
            .build();
        Self { cache }
    }
}

impl Default for CacheSessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl fmt::Debug for CacheSessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheSessionStore")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl SessionStore for CacheSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.cache.contains_key(&record.id) {
            record.id = Id::default();
        }
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.cache.insert(record.id, record.clone()).await;
        Ok(())
    }

    async fn load(&self, session_id: &Id) -> session_store::Result<Option<Record>> {
        let Some(record) = self.cache.get(session_id).await else {
            return Ok(None);
        };
        if record.expiry_date <= OffsetDateTime::now_utc() {
            self.cache.invalidate(session_id).await;
            return Ok(None);
        }
        Ok(Some(record))
    }

    async fn delete(&self, session_id: &Id) -> session_store::Result<()> {
        self.cache.invalidate(session_id).await;
        Ok(())
    }
}
