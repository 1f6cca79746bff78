//! Swappable simulated-latency policy.
//!
//! The backend is simulated, so every operation fakes a network round trip
//! with a timer delay. The delay is a policy the engine asks before each
//! operation: tests inject zero, the demo binary keeps the slow feel.

use std::time::Duration;

/// The engine operations that go through a simulated round trip.
/// `logout` is intentionally absent: it resolves immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOp {
    Login,
    ChangePassword,
    ForgotPassword,
    VerifyOtp,
    ResetPassword,
}

/// How long an operation should suspend before resolving.
///
/// The suspension is non-blocking (`tokio::time::sleep`), never a
/// hardware-timer sleep; a zero duration skips the timer entirely.
pub trait LatencyPolicy: Send + Sync {
    fn delay_for(&self, op: AuthOp) -> Duration;
}

/// The demo's round-trip delays: 1.5 s everywhere, 1 s for OTP verification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedLatency;

impl LatencyPolicy for SimulatedLatency {
    fn delay_for(&self, op: AuthOp) -> Duration {
        match op {
            AuthOp::VerifyOtp => Duration::from_millis(1000),
            _ => Duration::from_millis(1500),
        }
    }
}

/// Zero delay for every operation. The test policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLatency;

impl LatencyPolicy for NoLatency {
    fn delay_for(&self, _op: AuthOp) -> Duration {
        Duration::ZERO
    }
}
