//! Directed allow-rule between two groups.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NetPolicyError, Result};

/// Allows traffic from `source` into `destination`.
///
/// Equality is exact pairwise equality; the store keeps duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "group1", default)]
    pub source: String,
    #[serde(rename = "group2", default)]
    pub destination: String,
}

impl Rule {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// Both endpoints must be non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.source.is_empty() || self.destination.is_empty() {
            return Err(NetPolicyError::BadRequest("missing required field(s)".into()));
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <--> {}", self.source, self.destination)
    }
}
