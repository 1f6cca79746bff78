//! In-memory session store for tests and dev runs.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};

use hrportal_core::UserRecord;

use crate::store::{SessionStore, SessionStoreError};

#[derive(Debug, Clone)]
struct StoredEntry {
    /// Raw JSON exactly as written; parsed on every read so that a corrupt
    /// value behaves the same as in a durable store.
    raw: String,
    expires_at: DateTime<Utc>,
}

/// In-memory store holding the raw JSON entry under the `user` key.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entry: RwLock<Option<StoredEntry>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Store an arbitrary raw value. Hook for corrupt- and expired-entry
    /// tests; production writes go through [`SessionStore::write`].
    pub fn write_raw(&self, raw: impl Into<String>, expires_at: DateTime<Utc>) {
        let mut entry = self.entry.write().unwrap();
        *entry = Some(StoredEntry {
            raw: raw.into(),
            expires_at,
        });
    }

    /// Read against an explicit `now`, so expiry is testable without
    /// sleeping. [`SessionStore::read`] delegates here with `Utc::now()`.
    pub fn read_at(&self, now: DateTime<Utc>) -> Result<Option<UserRecord>, SessionStoreError> {
        let parsed = {
            let entry = self.entry.read().unwrap();
            match entry.as_ref() {
                None => return Ok(None),
                Some(stored) if stored.expires_at <= now => Err("expired"),
                Some(stored) => serde_json::from_str::<UserRecord>(&stored.raw)
                    .map_err(|_| "unparseable"),
            }
        };

        match parsed {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                tracing::warn!(reason, "clearing unusable session entry");
                self.clear()?;
                Ok(None)
            }
        }
    }
}

impl SessionStore for InMemorySessionStore {
    fn read(&self) -> Result<Option<UserRecord>, SessionStoreError> {
        self.read_at(Utc::now())
    }

    fn write(&self, user: &UserRecord, ttl: Duration) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| SessionStoreError::Encode(e.to_string()))?;
        let expires_at = Utc::now()
            + chrono::Duration::from_std(ttl)
                .map_err(|e| SessionStoreError::Encode(e.to_string()))?;
        self.write_raw(raw, expires_at);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        let mut entry = self.entry.write().unwrap();
        *entry = None;
        Ok(())
    }
}
