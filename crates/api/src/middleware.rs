use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::Instrument;
use uuid::Uuid;

use hrportal_core::Route;
use hrportal_guard::RouteDecision;
use hrportal_session::SessionStore;

/// Per-request id, inserted by [`request_id`] for handlers that want it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

#[derive(Clone)]
pub struct GuardState {
    pub store: Arc<dyn SessionStore>,
}

/// Route-guard middleware.
///
/// Runs before any handler, on every request whose path is one of the five
/// monitored routes; everything else passes through untouched. Reads the
/// persisted record straight from the store — not through the engine —
/// because it must also cover the very first request of a session.
pub async fn route_guard(
    State(state): State<GuardState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(route) = Route::from_path(req.uri().path()) else {
        return next.run(req).await;
    };

    let session = state.store.read().unwrap_or_else(|err| {
        // A broken store must not lock the user out of public pages.
        tracing::error!(%err, "session store read failed; treating as no session");
        None
    });

    match hrportal_guard::decide(route, session.as_ref()) {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(from = %route, to = %target, "guard redirect");
            Redirect::temporary(target.as_path()).into_response()
        }
    }
}

/// Tag every request with an id and a span.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = RequestId(Uuid::now_v7());
    req.extensions_mut().insert(id);

    let span = tracing::info_span!(
        "request",
        id = %id.0,
        method = %req.method(),
        path = %req.uri().path(),
    );
    next.run(req).instrument(span).await
}
