//! Session store abstraction.

use std::time::Duration;

use hrportal_core::UserRecord;

/// Durable key-value persistence of the single user record.
///
/// Contract shared by all implementations:
/// - at most one record is held at a time;
/// - a stored value that is expired or fails to parse reads as absent, and
///   the offending entry is cleared as a side effect — never surfaced as an
///   error;
/// - errors are reserved for real storage failures (IO).
pub trait SessionStore: Send + Sync {
    /// The persisted record, or `None` if missing, expired, or corrupt.
    fn read(&self) -> Result<Option<UserRecord>, SessionStoreError>;

    /// Persist `user`, to expire `ttl` after this write. Overwrites any
    /// previous record.
    fn write(&self, user: &UserRecord, ttl: Duration) -> Result<(), SessionStoreError>;

    /// Remove the persisted record. Idempotent.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Session store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionStoreError {
    #[error("storage io: {0}")]
    Io(String),
    #[error("failed to encode record: {0}")]
    Encode(String),
}

impl From<std::io::Error> for SessionStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
