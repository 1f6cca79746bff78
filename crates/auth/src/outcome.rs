//! Operation outcomes.
//!
//! Every expected failure is a named outcome value, not an error: callers
//! branch on these to drive toasts and navigation. The optional
//! [`Route`] returned by `next_route` is the navigation signal the
//! presentation layer acts on.

use serde::Serialize;

use hrportal_core::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    Success {
        /// True when the factory-default password was the matching
        /// credential; the client must change it before anything else.
        must_change_password: bool,
    },
    InvalidCredentials,
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn next_route(&self) -> Option<Route> {
        match self {
            Self::Success {
                must_change_password: true,
            } => Some(Route::ChangePassword),
            Self::Success {
                must_change_password: false,
            } => Some(Route::Dashboard),
            Self::InvalidCredentials => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ChangePasswordOutcome {
    Success,
    WrongOldPassword,
}

impl ChangePasswordOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn next_route(&self) -> Option<Route> {
        match self {
            Self::Success => Some(Route::Dashboard),
            Self::WrongOldPassword => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForgotPasswordOutcome {
    Sent {
        /// The fixed demo OTP, revealed to the caller for display. This is
        /// intentional demo transparency, not a pattern to reuse with a
        /// real delivery channel.
        otp: &'static str,
    },
    UserNotFound,
}

impl ForgotPasswordOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOtpOutcome {
    Verified,
    Invalid,
}

impl VerifyOtpOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResetPasswordOutcome {
    Success,
    Failure,
}

impl ResetPasswordOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn next_route(&self) -> Option<Route> {
        match self {
            Self::Success => Some(Route::Login),
            Self::Failure => None,
        }
    }
}
