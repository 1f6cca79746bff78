//! Forgot-password flow state machine.
//!
//! The flow is a tagged state machine with defined transitions:
//!
//! `Email --sent--> Otp --verified--> Reset --success--> Complete`
//!
//! Failure outcomes leave the state where it was, so the caller can retry
//! the same step. Submitting the wrong step is a caller error.

use thiserror::Error;

use crate::engine::{AuthEngine, AuthError};
use crate::outcome::{ForgotPasswordOutcome, ResetPasswordOutcome, VerifyOtpOutcome};

/// Where the flow currently stands. The email captured at the first step is
/// carried forward so later steps verify against the same address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetFlowState {
    Email,
    Otp { email: String },
    Reset { email: String },
    Complete,
}

impl ResetFlowState {
    fn step_name(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Otp { .. } => "otp",
            Self::Reset { .. } => "reset",
            Self::Complete => "complete",
        }
    }
}

#[derive(Debug, Error)]
pub enum ResetFlowError {
    /// The caller submitted a step the flow is not on.
    #[error("flow is on step '{actual}', not '{expected}'")]
    OutOfOrder {
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// One client's pass through the forgot-password flow.
#[derive(Debug)]
pub struct PasswordResetFlow {
    state: ResetFlowState,
}

impl PasswordResetFlow {
    pub fn new() -> Self {
        Self {
            state: ResetFlowState::Email,
        }
    }

    pub fn state(&self) -> &ResetFlowState {
        &self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ResetFlowState::Complete
    }

    fn out_of_order(&self, expected: &'static str) -> ResetFlowError {
        ResetFlowError::OutOfOrder {
            expected,
            actual: self.state.step_name(),
        }
    }

    /// Step 1: request the OTP for `email`. Advances to [`ResetFlowState::Otp`]
    /// on a `Sent` outcome.
    pub async fn submit_email(
        &mut self,
        engine: &AuthEngine,
        email: &str,
    ) -> Result<ForgotPasswordOutcome, ResetFlowError> {
        if self.state != ResetFlowState::Email {
            return Err(self.out_of_order("email"));
        }

        let outcome = engine.forgot_password(email).await?;
        if outcome.is_sent() {
            self.state = ResetFlowState::Otp {
                email: email.to_string(),
            };
        }
        Ok(outcome)
    }

    /// Step 2: verify the code against the email captured in step 1.
    pub async fn submit_otp(
        &mut self,
        engine: &AuthEngine,
        otp: &str,
    ) -> Result<VerifyOtpOutcome, ResetFlowError> {
        let ResetFlowState::Otp { email } = &self.state else {
            return Err(self.out_of_order("otp"));
        };

        let email = email.clone();
        let outcome = engine.verify_otp(&email, otp).await?;
        if outcome.is_verified() {
            self.state = ResetFlowState::Reset { email };
        }
        Ok(outcome)
    }

    /// Step 3: set the new password. A `Success` outcome is terminal.
    pub async fn submit_new_password(
        &mut self,
        engine: &AuthEngine,
        new_password: &str,
    ) -> Result<ResetPasswordOutcome, ResetFlowError> {
        let ResetFlowState::Reset { email } = &self.state else {
            return Err(self.out_of_order("reset"));
        };

        let email = email.clone();
        let outcome = engine.reset_password(&email, new_password).await?;
        if outcome.is_success() {
            self.state = ResetFlowState::Complete;
        }
        Ok(outcome)
    }
}

impl Default for PasswordResetFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::NoLatency;
    use crate::outcome::LoginOutcome;
    use hrportal_core::UserRecord;
    use hrportal_session::{InMemorySessionStore, SessionStore};
    use std::sync::Arc;

    fn engine() -> (Arc<InMemorySessionStore>, AuthEngine) {
        let store = InMemorySessionStore::arc();
        let engine = AuthEngine::new(store.clone(), Arc::new(NoLatency));
        (store, engine)
    }

    #[tokio::test]
    async fn happy_path_walks_all_three_steps() {
        let (store, engine) = engine();
        let mut flow = PasswordResetFlow::new();

        let outcome = flow.submit_email(&engine, "admin@work.com").await.unwrap();
        assert_eq!(outcome, ForgotPasswordOutcome::Sent { otp: "123456" });
        assert!(matches!(flow.state(), ResetFlowState::Otp { .. }));

        let outcome = flow.submit_otp(&engine, "123456").await.unwrap();
        assert_eq!(outcome, VerifyOtpOutcome::Verified);
        assert!(matches!(flow.state(), ResetFlowState::Reset { .. }));

        let outcome = flow.submit_new_password(&engine, "Brand#New1").await.unwrap();
        assert_eq!(outcome, ResetPasswordOutcome::Success);
        assert!(flow.is_complete());

        assert_eq!(
            store.read().unwrap(),
            Some(UserRecord::new("admin", "Brand#New1"))
        );
        let outcome = engine.login("admin", "Brand#New1").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                must_change_password: false
            }
        );
    }

    #[tokio::test]
    async fn unknown_email_keeps_the_flow_on_the_first_step() {
        let (_, engine) = engine();
        let mut flow = PasswordResetFlow::new();

        let outcome = flow.submit_email(&engine, "nobody@work.com").await.unwrap();
        assert_eq!(outcome, ForgotPasswordOutcome::UserNotFound);
        assert_eq!(flow.state(), &ResetFlowState::Email);
    }

    #[tokio::test]
    async fn wrong_otp_allows_a_retry_on_the_same_step() {
        let (_, engine) = engine();
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&engine, "admin@work.com").await.unwrap();

        let outcome = flow.submit_otp(&engine, "000000").await.unwrap();
        assert_eq!(outcome, VerifyOtpOutcome::Invalid);
        assert!(matches!(flow.state(), ResetFlowState::Otp { .. }));

        let outcome = flow.submit_otp(&engine, "123456").await.unwrap();
        assert_eq!(outcome, VerifyOtpOutcome::Verified);
    }

    #[tokio::test]
    async fn steps_out_of_order_are_rejected() {
        let (_, engine) = engine();
        let mut flow = PasswordResetFlow::new();

        let err = flow.submit_otp(&engine, "123456").await.unwrap_err();
        assert!(matches!(
            err,
            ResetFlowError::OutOfOrder {
                expected: "otp",
                actual: "email"
            }
        ));

        let err = flow
            .submit_new_password(&engine, "Brand#New1")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ResetFlowError::OutOfOrder {
                expected: "reset",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn completed_flow_accepts_nothing_further() {
        let (_, engine) = engine();
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&engine, "admin@work.com").await.unwrap();
        flow.submit_otp(&engine, "123456").await.unwrap();
        flow.submit_new_password(&engine, "Brand#New1").await.unwrap();

        let err = flow.submit_email(&engine, "admin@work.com").await.unwrap_err();
        assert!(matches!(err, ResetFlowError::OutOfOrder { .. }));
    }

    #[tokio::test]
    async fn flow_uses_the_email_captured_at_step_one() {
        let (_, engine) = engine();
        let mut flow = PasswordResetFlow::new();
        flow.submit_email(&engine, "ADMIN@WORK.COM").await.unwrap();

        // The stored (any-case) email is what step two verifies against.
        let outcome = flow.submit_otp(&engine, "123456").await.unwrap();
        assert_eq!(outcome, VerifyOtpOutcome::Verified);
    }
}
