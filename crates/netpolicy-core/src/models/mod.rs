//! Wire models shared by the server and its clients.
//!
//! Field names here are a stable contract: rules travel as `group1`/`group2`
//! and tags as quoted hex strings (or `null` when a group has none yet).

pub mod rule;
pub mod tag;
pub mod whitelist;

pub use rule::Rule;
pub use tag::PacketTag;
pub use whitelist::{IngressWhitelist, TaggedGroup};
