//! `hrportal-guard` — navigation policy over the monitored routes.
//!
//! The guard is a pure decision function, deliberately decoupled from both
//! the auth engine and the transport: it runs on the raw persisted record
//! before any UI or handler gets involved.
//!
//! - No IO
//! - No panics
//! - No business logic beyond the redirect table

use hrportal_core::{Route, UserRecord};

/// Outcome of a guard check for one navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the navigation proceed unmodified.
    Allow,
    /// Send the client to this route instead.
    Redirect(Route),
}

/// A session still on the factory-default password must change it before
/// going anywhere else.
pub fn is_first_time_login(user: &UserRecord) -> bool {
    user.has_default_password()
}

/// Decide what happens when a client navigates to `route` with the given
/// persisted session (`None` = unauthenticated). First match wins.
///
/// Paths outside the monitored set never reach this function; callers
/// resolve them with [`Route::from_path`] and pass unguarded paths through.
pub fn decide(route: Route, session: Option<&UserRecord>) -> RouteDecision {
    match session {
        Some(user) if is_first_time_login(user) => {
            // Forced password change: the only reachable page is the form.
            if route == Route::ChangePassword {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(Route::ChangePassword)
            }
        }
        Some(_) => {
            // Authenticated users have no business on public pages, and the
            // change-password form is reserved for first-time logins.
            if route.is_public() || route == Route::ChangePassword {
                RouteDecision::Redirect(Route::Dashboard)
            } else {
                RouteDecision::Allow
            }
        }
        None => {
            if route.is_public() || route == Route::Root {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect(Route::Login)
            }
        }
    }
}
