//! Packet tag and its quoted-hex wire codec.
//!
//! The JSON form is a lowercase hex string (`"0100"`), independent of the
//! general JSON codec for byte sequences, which would emit an array of numbers.

use std::fmt;

use bytes::Bytes;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Short byte identifier assigned once per group. Immutable and cheap to clone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PacketTag(Bytes);

impl PacketTag {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        hex::decode(s).map(|v| Self(Bytes::from(v)))
    }
}

impl From<&'static [u8]> for PacketTag {
    fn from(b: &'static [u8]) -> Self {
        Self(Bytes::from_static(b))
    }
}

impl From<Vec<u8>> for PacketTag {
    fn from(v: Vec<u8>) -> Self {
        Self(Bytes::from(v))
    }
}

impl fmt::Display for PacketTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PacketTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

struct PacketTagVisitor;

impl<'de> Visitor<'de> for PacketTagVisitor {
    type Value = PacketTag;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a hex-encoded packet tag string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<PacketTag, E> {
        PacketTag::from_hex(v).map_err(|e| E::custom(format!("unmarshal PacketTag: {e}")))
    }
}

impl<'de> Deserialize<'de> for PacketTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PacketTagVisitor)
    }
}
