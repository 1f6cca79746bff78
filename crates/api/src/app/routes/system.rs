use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use hrportal_auth::AuthEngine;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Snapshot of the in-memory session plus the busy flag, for clients that
/// disable inputs while an operation is in flight.
pub async fn session(Extension(engine): Extension<Arc<AuthEngine>>) -> impl IntoResponse {
    let user = engine.current_user();
    Json(json!({
        "user": user.map(|u| json!({ "username": u.username })),
        "busy": engine.is_busy(),
    }))
}
