use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use hrportal_auth::AuthError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Unexpected engine failures. Expected outcomes never come through here.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::OperationInFlight => json_error(
            StatusCode::CONFLICT,
            "operation_in_flight",
            "another operation is still running",
        ),
        AuthError::Store(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}
