//! File-backed session store.
//!
//! The durable analogue of the in-memory store: one JSON document on disk,
//! playing the role a client-side cookie jar would in a browser deployment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hrportal_core::UserRecord;

use crate::store::{SessionStore, SessionStoreError};

/// On-disk document: the raw record JSON under the `user` key, plus the
/// expiry stamped at write time.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDocument {
    user: String,
    expires_at: DateTime<Utc>,
}

/// Session store persisting to a single JSON file.
///
/// A file that fails to parse — the document itself or the record inside it
/// — is deleted and reads as absent, same as the corrupt-cookie rule.
/// Only genuine IO failures surface as errors.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read against an explicit `now`; [`SessionStore::read`] delegates with
    /// `Utc::now()`.
    pub fn read_at(&self, now: DateTime<Utc>) -> Result<Option<UserRecord>, SessionStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let parsed = serde_json::from_str::<StoredDocument>(&contents)
            .map_err(|_| "unparseable")
            .and_then(|doc| {
                if doc.expires_at <= now {
                    Err("expired")
                } else {
                    serde_json::from_str::<UserRecord>(&doc.user).map_err(|_| "unparseable")
                }
            });

        match parsed {
            Ok(user) => Ok(Some(user)),
            Err(reason) => {
                tracing::warn!(reason, path = %self.path.display(), "clearing unusable session file");
                self.clear()?;
                Ok(None)
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<Option<UserRecord>, SessionStoreError> {
        self.read_at(Utc::now())
    }

    fn write(&self, user: &UserRecord, ttl: Duration) -> Result<(), SessionStoreError> {
        let raw = serde_json::to_string(user)
            .map_err(|e| SessionStoreError::Encode(e.to_string()))?;
        let doc = StoredDocument {
            user: raw,
            expires_at: Utc::now()
                + chrono::Duration::from_std(ttl)
                    .map_err(|e| SessionStoreError::Encode(e.to_string()))?,
        };
        let contents = serde_json::to_string(&doc)
            .map_err(|e| SessionStoreError::Encode(e.to_string()))?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
