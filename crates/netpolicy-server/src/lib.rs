//! netpolicy server library entry.
//!
//! This crate wires the config loader, the shared rule store, and the HTTP
//! handlers into an axum router. It is consumed by the binary (`main.rs`) and
//! by integration tests that boot the router on an ephemeral port.

pub mod app_state;
pub mod config;
pub mod handlers;
pub mod ops;
pub mod router;
