use axum::Router;

pub mod auth;
pub mod pages;
pub mod system;

/// Router for the auth operations and the guarded page stubs.
pub fn router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .merge(pages::router())
}
