//! HTTP API: server, routing, and request/response mapping.
//!
//! This crate is the host surface for the demo portal: it wires the auth
//! engine and session store into an Axum router, runs the route guard as
//! middleware over the monitored paths, and enforces the caller-side input
//! validation the engine trusts to have happened.

pub mod app;
pub mod middleware;
