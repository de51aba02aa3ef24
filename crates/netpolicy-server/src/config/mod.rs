//! YAML config for the policy server.
//!
//! Every section rejects unknown keys, and the whole document is validated
//! before the server sees it: a config that loads is a config that boots.

pub mod schema;

use std::path::Path;

use netpolicy_core::error::{NetPolicyError, Result};

pub use schema::{ServerConfig, ServerSection, StoreSection};

/// Read and validate the config at `path`.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<ServerConfig> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(NetPolicyError::BadRequest("missing config file path".into()));
    }

    let text = std::fs::read_to_string(path).map_err(|e| {
        NetPolicyError::Internal(format!("reading {}: {e}", path.display()))
    })?;
    load_from_str(&text).map_err(|e| match e {
        NetPolicyError::BadRequest(msg) => {
            NetPolicyError::BadRequest(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

/// Parse and validate config text.
pub fn load_from_str(text: &str) -> Result<ServerConfig> {
    let cfg = serde_yaml::from_str::<ServerConfig>(text)
        .map_err(|e| NetPolicyError::BadRequest(format!("parsing config: {e}")))?;
    cfg.validate().map(|()| cfg)
}
