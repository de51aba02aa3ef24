use std::net::SocketAddr;

use serde::Deserialize;
use netpolicy_core::error::{NetPolicyError, Result};
use netpolicy_core::store::{MAX_TAG_LENGTH, MIN_TAG_LENGTH};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(NetPolicyError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.store.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            NetPolicyError::BadRequest(format!(
                "server.listen must be a valid socket address, got {:?}",
                self.listen
            ))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Width of each packet tag in bytes.
    #[serde(default = "default_tag_length")]
    pub tag_length: usize,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            tag_length: default_tag_length(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TAG_LENGTH..=MAX_TAG_LENGTH).contains(&self.tag_length) {
            return Err(NetPolicyError::BadRequest(format!(
                "store.tag_length must be between {MIN_TAG_LENGTH} and {MAX_TAG_LENGTH}"
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "127.0.0.1:5555".into()
}
fn default_tag_length() -> usize {
    8
}
