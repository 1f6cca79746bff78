//! Persisted user record.

use serde::{Deserialize, Serialize};

use crate::account;

/// The single persisted identity record.
///
/// This is also the storage contract: it serializes to a JSON object with
/// string fields `username` and `password`, stored under the `user` key.
/// The username is kept as the caller typed it; comparisons against the
/// valid identity are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
}

impl UserRecord {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True while the record still carries the factory-default password.
    pub fn has_default_password(&self) -> bool {
        self.password == account::DEFAULT_PASSWORD
    }
}
