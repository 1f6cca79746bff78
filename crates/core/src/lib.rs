//! `hrportal-core` — shared domain primitives for the demo HR portal.
//!
//! This crate contains **pure domain** types (no IO, no framework concerns):
//! the persisted user record, the demo account constants, and the closed set
//! of guarded routes.

pub mod account;
pub mod route;
pub mod user;

pub use route::Route;
pub use user::UserRecord;
