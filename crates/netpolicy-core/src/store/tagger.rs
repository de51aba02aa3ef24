//! Group tagger: allocates and memoizes one packet tag per group.
//!
//! Tags are a pure function of first-seen order. The Nth distinct group gets
//! the counter value N, written little-endian into eight bytes and sliced to
//! the configured width. Tags are never freed or reassigned.

use std::collections::HashMap;
use std::sync::Mutex;

use bytes::{BufMut, BytesMut};

use crate::error::{NetPolicyError, Result};
use crate::models::PacketTag;

/// Smallest and largest supported tag width.
pub const MIN_TAG_LENGTH: usize = 1;
pub const MAX_TAG_LENGTH: usize = 8;

/// Source of packet tags for groups.
pub trait Tagger: Send + Sync {
    /// Idempotent: returns the memoized tag for a known group, or allocates
    /// the next one.
    fn get_tag(&self, group_id: &str) -> Result<PacketTag>;
}

/// In-memory tagger. All access is serialized by one lock.
pub struct MemoryTagger {
    tag_length: usize,
    tags: Mutex<HashMap<String, PacketTag>>,
}

impl MemoryTagger {
    pub fn new(tag_length: usize) -> Result<Self> {
        if !(MIN_TAG_LENGTH..=MAX_TAG_LENGTH).contains(&tag_length) {
            return Err(NetPolicyError::InvalidTagLength(tag_length));
        }
        Ok(Self {
            tag_length,
            tags: Mutex::new(HashMap::new()),
        })
    }

    pub fn tag_length(&self) -> usize {
        self.tag_length
    }

    /// Largest counter value this tagger will encode.
    ///
    /// The width is applied as a bit count here while the encoding slices it
    /// as a byte count: a width of 4 tags at most 16 groups.
    pub fn capacity(&self) -> u64 {
        1u64 << self.tag_length
    }

    #[cfg(test)]
    fn len(&self) -> Result<usize> {
        let tags = self.tags.lock().map_err(|_| NetPolicyError::poisoned("tagger"))?;
        Ok(tags.len())
    }

    fn encode(&self, counter: u64) -> Result<PacketTag> {
        if counter > self.capacity() {
            return Err(NetPolicyError::TagCapacityExceeded(counter));
        }
        let mut buf = BytesMut::with_capacity(8);
        buf.put_u64_le(counter);
        buf.truncate(self.tag_length);
        Ok(PacketTag::new(buf.freeze()))
    }
}

impl Tagger for MemoryTagger {
    fn get_tag(&self, group_id: &str) -> Result<PacketTag> {
        let mut tags = self.tags.lock().map_err(|_| NetPolicyError::poisoned("tagger"))?;

        if let Some(tag) = tags.get(group_id) {
            return Ok(tag.clone());
        }

        let counter = tags.len() as u64 + 1;
        let tag = self.encode(counter)?;
        tags.insert(group_id.to_string(), tag.clone());
        tracing::debug!(group = %group_id, %tag, counter, "allocated tag");
        Ok(tag)
    }
}
