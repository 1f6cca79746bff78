//! Pure credential policy.
//!
//! Separated from the engine so the acceptance rule can be checked without
//! storage or timers (same shape as a pure authorization check).

use hrportal_core::{account, UserRecord};

/// Evaluate a login attempt against the persisted record, if any.
///
/// Returns the canonical password to store on acceptance: the factory
/// default when that was the matching credential, otherwise the persisted
/// password. `None` means the credentials were rejected.
pub fn accepted_password(
    username: &str,
    password: &str,
    persisted: Option<&UserRecord>,
) -> Option<String> {
    if !account::is_admin_username(username) {
        return None;
    }
    if password == account::DEFAULT_PASSWORD {
        return Some(account::DEFAULT_PASSWORD.to_string());
    }
    persisted
        .filter(|user| user.password == password)
        .map(|user| user.password.clone())
}
