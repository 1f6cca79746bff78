//! HTTP application wiring (Axum router).
//!
//! - `routes/`: handlers (auth operations, pages, system)
//! - `dto.rs`: request DTOs
//! - `validation.rs`: caller-side input validation (the engine trusts it)
//! - `errors.rs`: consistent JSON error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use hrportal_auth::AuthEngine;
use hrportal_session::SessionStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod validation;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// The guard middleware gets the store directly, not the engine: it has to
/// run on the raw persisted record before anything else touches the request.
pub fn build_app(engine: Arc<AuthEngine>, store: Arc<dyn SessionStore>) -> Router {
    let guard_state = middleware::GuardState { store };

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/session", get(routes::system::session))
        .merge(routes::router())
        .layer(Extension(engine))
        // Applied top-down: every request gets an id, then the guard runs.
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::request_id))
                .layer(axum::middleware::from_fn_with_state(
                    guard_state,
                    middleware::route_guard,
                )),
        )
}
