//! Stub handlers for the five guarded pages.
//!
//! Rendering is not this system's business; these exist so the guard
//! middleware has real routes to protect. Each answers with the page name
//! it would render.

use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

use hrportal_core::Route;

pub fn router() -> Router {
    Router::new()
        .route(Route::Root.as_path(), get(root))
        .route(Route::Dashboard.as_path(), get(dashboard))
        .route(Route::Login.as_path(), get(login))
        .route(Route::ChangePassword.as_path(), get(change_password))
        .route(Route::ForgotPassword.as_path(), get(forgot_password))
}

fn page(route: Route) -> impl IntoResponse {
    Json(json!({ "page": route.as_path() }))
}

async fn root() -> impl IntoResponse {
    page(Route::Root)
}

async fn dashboard() -> impl IntoResponse {
    page(Route::Dashboard)
}

async fn login() -> impl IntoResponse {
    page(Route::Login)
}

async fn change_password() -> impl IntoResponse {
    page(Route::ChangePassword)
}

async fn forgot_password() -> impl IntoResponse {
    page(Route::ForgotPassword)
}
