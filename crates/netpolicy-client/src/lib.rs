//! HTTP clients for the policy server, plus the operator CLI plumbing.
//!
//! - [`OuterClient`]: rule CRUD for operators and tooling.
//! - [`InnerClient`]: whitelist polling for dataplane agents.
//! - [`cli`]: the `net-allow` / `net-disallow` / `net-list` runner.

pub mod cli;
mod http;
pub mod inner;
pub mod outer;

pub use inner::InnerClient;
pub use outer::{OuterClient, RulesApi};
