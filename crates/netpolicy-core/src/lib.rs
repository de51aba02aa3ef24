//! netpolicy core: the in-memory rule store, the group tagger, and the wire
//! models shared by the server and its clients.
//!
//! This crate carries no transport or runtime dependencies. Every operation is
//! a bounded in-memory computation guarded by a mutex, so it can be called
//! directly from async handlers.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. A poisoned lock is
//! reported as `NetPolicyError::Internal` instead of bringing the server down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod models;
pub mod store;

/// Shared result type.
pub use error::{Result, NetPolicyError};
