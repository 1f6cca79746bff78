//! The auth engine: session state plus the six simulated operations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use hrportal_core::{account, UserRecord};
use hrportal_session::{SessionStore, SessionStoreError};

use crate::credentials;
use crate::latency::{AuthOp, LatencyPolicy};
use crate::outcome::{
    ChangePasswordOutcome, ForgotPasswordOutcome, LoginOutcome, ResetPasswordOutcome,
    VerifyOtpOutcome,
};

/// Unexpected engine failure.
///
/// Expected business failures (wrong password, unknown email, bad OTP) are
/// outcome values, not errors. This enum covers the two genuinely
/// exceptional paths: an overlapping invocation and a storage failure.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another operation is still in flight. Callers are expected to
    /// disable inputs while [`AuthEngine::is_busy`] is true; this is the
    /// backstop when they don't.
    #[error("an auth operation is already in flight")]
    OperationInFlight,

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

/// Releases the busy flag when the operation ends, however it ends.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The simulated identity system.
///
/// Constructed once per process with an injected store and latency policy;
/// consumers receive it by reference (no global singleton). All operations
/// take `&self`: internal state is behind a lock, and the busy flag
/// serializes the operations themselves.
pub struct AuthEngine {
    store: Arc<dyn SessionStore>,
    latency: Arc<dyn LatencyPolicy>,
    current_user: RwLock<Option<UserRecord>>,
    busy: AtomicBool,
}

impl AuthEngine {
    pub fn new(store: Arc<dyn SessionStore>, latency: Arc<dyn LatencyPolicy>) -> Self {
        Self {
            store,
            latency,
            current_user: RwLock::new(None),
            busy: AtomicBool::new(false),
        }
    }

    /// Load the persisted session into memory. Call once at startup,
    /// before the first request can reach the engine.
    pub fn bootstrap(&self) -> Result<(), AuthError> {
        let user = self.store.read()?;
        *self.current_user.write().unwrap() = user;
        Ok(())
    }

    /// Snapshot of the in-memory session.
    pub fn current_user(&self) -> Option<UserRecord> {
        self.current_user.read().unwrap().clone()
    }

    /// True while an operation is in flight. Callers should disable new
    /// invocations while this holds.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Take the single-operation-at-a-time guard, or reject.
    fn begin_op(&self) -> Result<BusyGuard<'_>, AuthError> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map_err(|_| AuthError::OperationInFlight)?;
        Ok(BusyGuard { flag: &self.busy })
    }

    /// Suspend for the policy's delay. Non-blocking; zero skips the timer.
    async fn round_trip(&self, op: AuthOp) {
        let delay = self.latency.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// Attempt a login with the credentials as typed.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, AuthError> {
        let _busy = self.begin_op()?;
        self.round_trip(AuthOp::Login).await;

        // Re-read the store so a password changed in a previous session
        // (or by a reset) is honored.
        let persisted = self.store.read()?;

        let Some(canonical) =
            credentials::accepted_password(username, password, persisted.as_ref())
        else {
            tracing::warn!(username, "login rejected: invalid credentials");
            return Ok(LoginOutcome::InvalidCredentials);
        };

        let must_change_password = canonical == account::DEFAULT_PASSWORD;
        let record = UserRecord::new(username, canonical);
        self.store.write(&record, account::SESSION_TTL)?;
        *self.current_user.write().unwrap() = Some(record);

        tracing::info!(username, must_change_password, "login accepted");
        Ok(LoginOutcome::Success {
            must_change_password,
        })
    }

    /// Clear the session. Resolves immediately: no simulated round trip,
    /// and the navigation signal is [`hrportal_core::Route::Login`].
    pub fn logout(&self) -> Result<(), AuthError> {
        let _busy = self.begin_op()?;
        *self.current_user.write().unwrap() = None;
        self.store.clear()?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Change the persisted password, keeping the username.
    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> Result<ChangePasswordOutcome, AuthError> {
        let _busy = self.begin_op()?;
        self.round_trip(AuthOp::ChangePassword).await;

        let persisted = self.store.read()?;
        let Some(current) = persisted.filter(|user| user.password == old_password) else {
            tracing::warn!("password change rejected: wrong old password");
            return Ok(ChangePasswordOutcome::WrongOldPassword);
        };

        let updated = UserRecord::new(current.username, new_password);
        self.store.write(&updated, account::SESSION_TTL)?;
        *self.current_user.write().unwrap() = Some(updated);

        tracing::info!("password changed");
        Ok(ChangePasswordOutcome::Success)
    }

    /// "Send" the reset OTP. The outcome reveals the fixed code on success;
    /// nothing is mutated either way.
    pub async fn forgot_password(
        &self,
        email: &str,
    ) -> Result<ForgotPasswordOutcome, AuthError> {
        let _busy = self.begin_op()?;
        self.round_trip(AuthOp::ForgotPassword).await;

        if account::is_reset_email(email) {
            tracing::info!("reset code issued");
            Ok(ForgotPasswordOutcome::Sent {
                otp: account::DEMO_OTP,
            })
        } else {
            tracing::warn!("reset rejected: unknown email");
            Ok(ForgotPasswordOutcome::UserNotFound)
        }
    }

    /// Check an OTP against the fixed code. No mutation, no attempt
    /// counting.
    pub async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
    ) -> Result<VerifyOtpOutcome, AuthError> {
        let _busy = self.begin_op()?;
        self.round_trip(AuthOp::VerifyOtp).await;

        if account::is_reset_email(email) && otp == account::DEMO_OTP {
            Ok(VerifyOtpOutcome::Verified)
        } else {
            tracing::warn!("otp rejected");
            Ok(VerifyOtpOutcome::Invalid)
        }
    }

    /// Final step of the forgot-password flow: overwrite the persisted
    /// record with the new password, whether or not a session existed.
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> Result<ResetPasswordOutcome, AuthError> {
        let _busy = self.begin_op()?;
        self.round_trip(AuthOp::ResetPassword).await;

        if !account::is_reset_email(email) {
            tracing::warn!("password reset rejected: unknown email");
            return Ok(ResetPasswordOutcome::Failure);
        }

        let record = UserRecord::new(account::ADMIN_USERNAME, new_password);
        self.store.write(&record, account::SESSION_TTL)?;

        tracing::info!("password reset complete");
        Ok(ResetPasswordOutcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latency::{NoLatency, SimulatedLatency};
    use hrportal_session::InMemorySessionStore;

    fn engine() -> (Arc<InMemorySessionStore>, AuthEngine) {
        let store = InMemorySessionStore::arc();
        let engine = AuthEngine::new(store.clone(), Arc::new(NoLatency));
        (store, engine)
    }

    #[tokio::test]
    async fn default_password_login_succeeds_for_any_username_case() {
        for username in ["admin", "Admin", "ADMIN", "aDmIn"] {
            let (_, engine) = engine();
            let outcome = engine.login(username, "Test@123").await.unwrap();
            assert_eq!(
                outcome,
                LoginOutcome::Success {
                    must_change_password: true
                },
                "username {username}"
            );
            // The username is persisted as typed.
            assert_eq!(engine.current_user().unwrap().username, username);
        }
    }

    #[tokio::test]
    async fn wrong_password_without_a_record_is_rejected() {
        let (store, engine) = engine();
        let outcome = engine.login("admin", "WrongPass1").await.unwrap();
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
        assert_eq!(engine.current_user(), None);
        assert_eq!(store.read().unwrap(), None);
    }

    #[tokio::test]
    async fn wrong_username_is_rejected_even_with_default_password() {
        let (_, engine) = engine();
        let outcome = engine.login("root", "Test@123").await.unwrap();
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    }

    #[tokio::test]
    async fn login_persists_the_record_with_the_canonical_password() {
        let (store, engine) = engine();
        engine.login("Admin", "Test@123").await.unwrap();
        assert_eq!(
            store.read().unwrap(),
            Some(UserRecord::new("Admin", "Test@123"))
        );
    }

    #[tokio::test]
    async fn logout_clears_memory_and_store() {
        let (store, engine) = engine();
        engine.login("admin", "Test@123").await.unwrap();
        engine.logout().unwrap();
        assert_eq!(engine.current_user(), None);
        assert_eq!(store.read().unwrap(), None);
    }

    #[tokio::test]
    async fn logout_forgets_a_changed_password() {
        let (_, engine) = engine();
        engine.login("admin", "Test@123").await.unwrap();

        let outcome = engine.change_password("Test@123", "Fresh#456").await.unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::Success);

        engine.logout().unwrap();

        // Logout cleared the only record, so the changed password is gone
        // and the factory default is back in force.
        let outcome = engine.login("admin", "Fresh#456").await.unwrap();
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
        let outcome = engine.login("admin", "Test@123").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                must_change_password: true
            }
        );
    }

    #[tokio::test]
    async fn new_password_survives_while_the_record_persists() {
        let (_, engine) = engine();
        engine.login("admin", "Test@123").await.unwrap();
        engine.change_password("Test@123", "Fresh#456").await.unwrap();

        // Without logging out, a fresh login with the new password is a
        // normal (non-first-time) login.
        let outcome = engine.login("admin", "Fresh#456").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                must_change_password: false
            }
        );

        // The old password no longer works once it differs from the default.
        engine.change_password("Fresh#456", "Newer#789").await.unwrap();
        let outcome = engine.login("admin", "Fresh#456").await.unwrap();
        assert_eq!(outcome, LoginOutcome::InvalidCredentials);
    }

    #[tokio::test]
    async fn change_password_without_a_record_is_rejected() {
        let (_, engine) = engine();
        let outcome = engine.change_password("Test@123", "Fresh#456").await.unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::WrongOldPassword);
    }

    #[tokio::test]
    async fn change_password_with_wrong_old_password_is_rejected() {
        let (store, engine) = engine();
        engine.login("admin", "Test@123").await.unwrap();
        let outcome = engine.change_password("nope", "Fresh#456").await.unwrap();
        assert_eq!(outcome, ChangePasswordOutcome::WrongOldPassword);
        // Nothing was mutated.
        assert_eq!(
            store.read().unwrap(),
            Some(UserRecord::new("admin", "Test@123"))
        );
    }

    #[tokio::test]
    async fn forgot_password_only_accepts_the_reset_email() {
        let (store, engine) = engine();

        let outcome = engine.forgot_password("Admin@Work.com").await.unwrap();
        assert_eq!(outcome, ForgotPasswordOutcome::Sent { otp: "123456" });

        let outcome = engine.forgot_password("someone@else.com").await.unwrap();
        assert_eq!(outcome, ForgotPasswordOutcome::UserNotFound);

        // Neither path mutates the store.
        assert_eq!(store.read().unwrap(), None);
    }

    #[tokio::test]
    async fn verify_otp_accepts_only_the_exact_pair() {
        let (_, engine) = engine();
        assert_eq!(
            engine.verify_otp("ADMIN@WORK.COM", "123456").await.unwrap(),
            VerifyOtpOutcome::Verified
        );
        assert_eq!(
            engine.verify_otp("admin@work.com", "654321").await.unwrap(),
            VerifyOtpOutcome::Invalid
        );
        assert_eq!(
            engine.verify_otp("other@work.com", "123456").await.unwrap(),
            VerifyOtpOutcome::Invalid
        );
    }

    #[tokio::test]
    async fn reset_password_then_login_is_a_normal_login() {
        let (store, engine) = engine();
        let outcome = engine
            .reset_password("admin@work.com", "NewPass1")
            .await
            .unwrap();
        assert_eq!(outcome, ResetPasswordOutcome::Success);
        assert_eq!(
            store.read().unwrap(),
            Some(UserRecord::new("admin", "NewPass1"))
        );

        let outcome = engine.login("admin", "NewPass1").await.unwrap();
        assert_eq!(
            outcome,
            LoginOutcome::Success {
                must_change_password: false
            }
        );
    }

    #[tokio::test]
    async fn reset_password_overwrites_an_existing_session_record() {
        let (store, engine) = engine();
        engine.login("admin", "Test@123").await.unwrap();
        engine
            .reset_password("admin@work.com", "NewPass1")
            .await
            .unwrap();
        assert_eq!(
            store.read().unwrap(),
            Some(UserRecord::new("admin", "NewPass1"))
        );
    }

    #[tokio::test]
    async fn reset_password_with_unknown_email_mutates_nothing() {
        let (store, engine) = engine();
        let outcome = engine
            .reset_password("someone@else.com", "NewPass1")
            .await
            .unwrap();
        assert_eq!(outcome, ResetPasswordOutcome::Failure);
        assert_eq!(store.read().unwrap(), None);
    }

    #[tokio::test]
    async fn bootstrap_loads_the_persisted_session() {
        let store = InMemorySessionStore::arc();
        store
            .write(
                &UserRecord::new("admin", "Changed1!"),
                std::time::Duration::from_secs(60),
            )
            .unwrap();

        let engine = AuthEngine::new(store, Arc::new(NoLatency));
        assert_eq!(engine.current_user(), None);
        engine.bootstrap().unwrap();
        assert_eq!(
            engine.current_user(),
            Some(UserRecord::new("admin", "Changed1!"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_operations_are_rejected_while_busy() {
        let store = InMemorySessionStore::arc();
        let engine = Arc::new(AuthEngine::new(store, Arc::new(SimulatedLatency)));

        let first = tokio::spawn({
            let engine = engine.clone();
            async move { engine.login("admin", "Test@123").await }
        });

        // Let the first operation take the busy guard and park on its timer.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(engine.is_busy());

        let err = engine
            .verify_otp("admin@work.com", "123456")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::OperationInFlight));

        // The in-flight operation still runs to completion.
        let outcome = first.await.unwrap().unwrap();
        assert!(outcome.is_success());
        assert!(!engine.is_busy());
    }
}
