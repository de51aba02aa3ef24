//! Rule store and group tagger.
//!
//! Control flow is store -> tagger: `RuleStore::add` obtains a tag for both
//! endpoints before recording the rule, and `get_whitelists` joins the rule
//! list against the tags cached by successful adds.

pub mod memory;
pub mod tagger;

pub use memory::RuleStore;
pub use tagger::{MemoryTagger, Tagger, MAX_TAG_LENGTH, MIN_TAG_LENGTH};
