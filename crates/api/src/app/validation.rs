//! Caller-side input validation.
//!
//! The engine trusts these checks to have happened before it is called.
//! A violation never reaches the engine; it becomes a 400 here.

use axum::http::StatusCode;
use axum::response::Response;

use crate::app::errors::json_error;

const MIN_PASSWORD_LEN: usize = 8;

fn bad_request(message: impl Into<String>) -> Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", message)
}

pub fn require_non_empty(field: &'static str, value: &str) -> Result<(), Response> {
    if value.trim().is_empty() {
        return Err(bad_request(format!("{field} must not be empty")));
    }
    Ok(())
}

/// New password rules: minimum length plus the confirm-field match.
pub fn validate_new_password(new_password: &str, confirm: &str) -> Result<(), Response> {
    if new_password.len() < MIN_PASSWORD_LEN {
        return Err(bad_request(format!(
            "new password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if new_password != confirm {
        return Err(bad_request("passwords do not match"));
    }
    Ok(())
}

/// Well-formed email: one `@` with a non-empty local and domain part.
pub fn validate_email(email: &str) -> Result<(), Response> {
    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !well_formed {
        return Err(bad_request("invalid email address"));
    }
    Ok(())
}

/// OTP format: exactly six ASCII digits.
pub fn validate_otp(otp: &str) -> Result<(), Response> {
    if otp.len() != 6 || !otp.chars().all(|c| c.is_ascii_digit()) {
        return Err(bad_request("OTP must be 6 digits"));
    }
    Ok(())
}
