//! Operator CLI plumbing behind `netpolicyctl`.
//!
//! Human-readable app names are resolved to group ids through a
//! [`GroupDirectory`] before any rule reaches the server.

pub mod directory;
pub mod runner;

pub use directory::{GroupDirectory, IdentityDirectory, StaticDirectory};
pub use runner::{Command, Runner};

pub const COMMAND_ALLOW: &str = "net-allow";
pub const COMMAND_DISALLOW: &str = "net-disallow";
pub const COMMAND_LIST: &str = "net-list";

/// Default policy server endpoint for operator tooling.
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5555";
