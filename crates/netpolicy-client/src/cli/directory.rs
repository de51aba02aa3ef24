//! App name <-> group id resolution.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

use netpolicy_core::error::{NetPolicyError, Result};

pub trait GroupDirectory: Send + Sync {
    /// Group id for an app name.
    fn group_for(&self, app_name: &str) -> Result<String>;
    /// App name for a group id, for display.
    fn name_for(&self, group_id: &str) -> Result<String>;
}

/// Names are group ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityDirectory;

impl GroupDirectory for IdentityDirectory {
    fn group_for(&self, app_name: &str) -> Result<String> {
        Ok(app_name.to_string())
    }

    fn name_for(&self, group_id: &str) -> Result<String> {
        Ok(group_id.to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DirectoryFile {
    #[serde(default)]
    apps: HashMap<String, String>,
}

/// Fixed mapping loaded from YAML:
///
/// ```yaml
/// apps:
///   web: 6f1c0a52-group
///   db: 91d2e7aa-group
/// ```
#[derive(Debug, Default, Clone)]
pub struct StaticDirectory {
    by_name: HashMap<String, String>,
    by_group: HashMap<String, String>,
}

impl StaticDirectory {
    pub fn load(path: &str) -> Result<Self> {
        let s = fs::read_to_string(path)
            .map_err(|e| NetPolicyError::Internal(format!("read directory {path} failed: {e}")))?;
        Self::from_yaml_str(&s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self> {
        let file: DirectoryFile = serde_yaml::from_str(s)
            .map_err(|e| NetPolicyError::BadRequest(format!("invalid directory yaml: {e}")))?;
        Ok(Self::from_pairs(file.apps))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut by_name = HashMap::new();
        let mut by_group = HashMap::new();
        for (name, group) in pairs {
            let (name, group) = (name.into(), group.into());
            by_group.insert(group.clone(), name.clone());
            by_name.insert(name, group);
        }
        Self { by_name, by_group }
    }
}

impl GroupDirectory for StaticDirectory {
    fn group_for(&self, app_name: &str) -> Result<String> {
        self.by_name
            .get(app_name)
            .cloned()
            .ok_or_else(|| NetPolicyError::BadRequest(format!("unknown app: {app_name}")))
    }

    fn name_for(&self, group_id: &str) -> Result<String> {
        self.by_group
            .get(group_id)
            .cloned()
            .ok_or_else(|| NetPolicyError::BadRequest(format!("unknown group: {group_id}")))
    }
}
