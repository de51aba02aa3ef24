//! Resolved ingress whitelist for one destination group.

use serde::{Deserialize, Deserializer, Serialize};

use super::tag::PacketTag;

/// A group id with its tag, or `None` when the group has never been tagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedGroup {
    pub id: String,
    pub tag: Option<PacketTag>,
}

impl TaggedGroup {
    pub fn new(id: impl Into<String>, tag: Option<PacketTag>) -> Self {
        Self { id: id.into(), tag }
    }
}

/// Derived view: the destination plus every source allowed into it, in rule
/// order and without deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressWhitelist {
    pub destination: TaggedGroup,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub allowed_sources: Vec<TaggedGroup>,
}

impl IngressWhitelist {
    pub fn untagged(id: impl Into<String>) -> Self {
        Self {
            destination: TaggedGroup::new(id, None),
            allowed_sources: Vec::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TaggedGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaggedGroup>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn untagged_destination_serializes_null_tag_and_empty_sources() {
        let wl = IngressWhitelist::untagged("never-seen");
        let json = serde_json::to_string(&wl).unwrap();
        assert_eq!(
            json,
            r#"{"destination":{"id":"never-seen","tag":null},"allowed_sources":[]}"#
        );
    }

    #[test]
    fn null_sources_decode_as_empty() {
        let wl: IngressWhitelist = serde_json::from_str(
            r#"{"destination":{"id":"g","tag":"01"},"allowed_sources":null}"#,
        )
        .unwrap();
        assert!(wl.allowed_sources.is_empty());
        assert_eq!(wl.destination.tag, Some(PacketTag::from(vec![1u8])));
    }
}
