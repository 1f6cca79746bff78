//! The closed set of guarded routes.
//!
//! The route guard runs on exactly these five paths; everything else passes
//! through unguarded. The set is an allow-list, not a complement.

use serde::{Deserialize, Serialize};

/// One of the five monitored application routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Root,
    Dashboard,
    Login,
    ChangePassword,
    ForgotPassword,
}

impl Route {
    /// All monitored routes, in guard-registration order.
    pub const ALL: [Route; 5] = [
        Route::Root,
        Route::Dashboard,
        Route::Login,
        Route::ChangePassword,
        Route::ForgotPassword,
    ];

    /// Resolve a request path to a monitored route.
    ///
    /// `None` means the path is unguarded and must pass through unmodified.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(Route::Root),
            "/dashboard" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/change-password" => Some(Route::ChangePassword),
            "/forgot-password" => Some(Route::ForgotPassword),
            _ => None,
        }
    }

    pub fn as_path(self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
            Route::ChangePassword => "/change-password",
            Route::ForgotPassword => "/forgot-password",
        }
    }

    /// Public routes are reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::ForgotPassword)
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_path())
    }
}
