//! Demo account constants.
//!
//! Exactly one identity exists in this system. These values are visible at
//! the boundary on purpose (simulated backend) — they are system constants,
//! not secrets.

use std::time::Duration;

/// The only valid username (compared case-insensitively).
pub const ADMIN_USERNAME: &str = "admin";

/// Factory-default password. A session still carrying it is a
/// first-time login and must change it before reaching the dashboard.
pub const DEFAULT_PASSWORD: &str = "Test@123";

/// The only email the forgot-password flow recognizes (case-insensitive).
pub const RESET_EMAIL: &str = "admin@work.com";

/// Fixed one-time code "delivered" by the forgot-password flow.
pub const DEMO_OTP: &str = "123456";

/// Time-to-live applied to the persisted user record at write time.
pub const SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Case-insensitive match against the single valid username.
pub fn is_admin_username(username: &str) -> bool {
    username.eq_ignore_ascii_case(ADMIN_USERNAME)
}

/// Case-insensitive match against the reset email.
pub fn is_reset_email(email: &str) -> bool {
    email.eq_ignore_ascii_case(RESET_EMAIL)
}
