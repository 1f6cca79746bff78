//! `hrportal-auth` — the simulated authentication engine.
//!
//! Holds the in-memory session state and implements the business rules of
//! the demo identity system: login, forced first-login password change, the
//! forgot-password OTP flow, and logout. Storage and latency are injected so
//! the engine itself stays deterministic under test.

pub mod credentials;
pub mod engine;
pub mod latency;
pub mod outcome;
pub mod reset_flow;

pub use engine::{AuthEngine, AuthError};
pub use latency::{AuthOp, LatencyPolicy, NoLatency, SimulatedLatency};
pub use outcome::{
    ChangePasswordOutcome, ForgotPasswordOutcome, LoginOutcome, ResetPasswordOutcome,
    VerifyOtpOutcome,
};
pub use reset_flow::{PasswordResetFlow, ResetFlowError, ResetFlowState};
