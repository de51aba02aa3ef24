//! Executes one CLI command against a [`RulesApi`].

use netpolicy_core::error::Result;
use netpolicy_core::models::Rule;

use super::directory::GroupDirectory;
use super::{COMMAND_ALLOW, COMMAND_DISALLOW, COMMAND_LIST};
use crate::outer::RulesApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Allow { source: String, destination: String },
    Disallow { source: String, destination: String },
    List,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Allow { .. } => COMMAND_ALLOW,
            Command::Disallow { .. } => COMMAND_DISALLOW,
            Command::List => COMMAND_LIST,
        }
    }
}

pub struct Runner<'a> {
    api: &'a dyn RulesApi,
    directory: &'a dyn GroupDirectory,
}

impl<'a> Runner<'a> {
    pub fn new(api: &'a dyn RulesApi, directory: &'a dyn GroupDirectory) -> Self {
        Self { api, directory }
    }

    /// Run a command and return the lines to show the user.
    pub async fn run(&self, command: &Command) -> Result<Vec<String>> {
        match command {
            Command::List => self.list().await,
            Command::Allow { source, destination } => {
                let rule = self.resolve(source, destination)?;
                self.api.add_rule(&rule).await?;
                Ok(vec![format!("allowed {source} <--> {destination}")])
            }
            Command::Disallow { source, destination } => {
                let rule = self.resolve(source, destination)?;
                self.api.delete_rule(&rule).await?;
                Ok(vec![format!("disallowed {source} <--> {destination}")])
            }
        }
    }

    fn resolve(&self, source: &str, destination: &str) -> Result<Rule> {
        let source = self.directory.group_for(source)?;
        let destination = self.directory.group_for(destination)?;
        Ok(Rule::new(source, destination))
    }

    async fn list(&self) -> Result<Vec<String>> {
        let rules = self.api.list_rules().await?;

        // resolve everything before printing anything
        let mut out = Vec::with_capacity(rules.len() + 1);
        out.push(format!("{COMMAND_ALLOW} rules:"));
        for rule in &rules {
            let source = self.directory.name_for(&rule.source)?;
            let destination = self.directory.name_for(&rule.destination)?;
            out.push(format!("{source} <--> {destination}"));
        }
        Ok(out)
    }
}
