//! Volatile rule store and the whitelist join.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{NetPolicyError, Result};
use crate::models::{IngressWhitelist, PacketTag, Rule, TaggedGroup};

use super::tagger::Tagger;

/// Rule list plus the tags of every group referenced by a stored rule.
#[derive(Default)]
struct StoreInner {
    rules: Vec<Rule>,
    tags: HashMap<String, PacketTag>,
}

/// In-memory multiset of allow-rules.
///
/// Construct once at startup, then share via Arc. Tag allocation goes
/// through the tagger's own lock; the rule list and tag cache share this one.
pub struct RuleStore {
    tagger: Arc<dyn Tagger>,
    inner: Mutex<StoreInner>,
}

impl RuleStore {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self {
            tagger,
            inner: Mutex::new(StoreInner::default()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner.lock().map_err(|_| NetPolicyError::poisoned("rule store"))
    }

    /// Tag both endpoints, then append the rule. Duplicates are kept.
    ///
    /// A failure tagging the destination leaves the source tag allocated in
    /// the tagger but records nothing here.
    pub fn add(&self, rule: Rule) -> Result<()> {
        let source_tag = self.tagger.get_tag(&rule.source).map_err(|e| {
            tracing::error!(group = %rule.source, error = %e, "get-tag");
            e
        })?;
        let destination_tag = self.tagger.get_tag(&rule.destination).map_err(|e| {
            tracing::error!(group = %rule.destination, error = %e, "get-tag");
            e
        })?;

        let mut inner = self.lock()?;
        inner.tags.insert(rule.source.clone(), source_tag.clone());
        inner.tags.insert(rule.destination.clone(), destination_tag.clone());
        tracing::info!(
            rule = %rule,
            source_tag = %source_tag,
            destination_tag = %destination_tag,
            "added"
        );
        inner.rules.push(rule);
        Ok(())
    }

    /// Remove every rule equal to `rule`. Fails with `NotFound` when nothing
    /// matched, leaving the store untouched.
    pub fn delete(&self, rule: &Rule) -> Result<()> {
        let mut inner = self.lock()?;
        let before = inner.rules.len();
        inner.rules.retain(|r| r != rule);

        let removed = before - inner.rules.len();
        if removed == 0 {
            return Err(NetPolicyError::NotFound);
        }
        tracing::info!(rule = %rule, removed, "deleted");
        Ok(())
    }

    /// Snapshot of all rules in insertion order.
    pub fn list(&self) -> Result<Vec<Rule>> {
        Ok(self.lock()?.rules.clone())
    }

    /// Resolve the ingress whitelist for each requested destination, in
    /// request order. Duplicated requests yield duplicated entries.
    ///
    /// A destination with no cached tag gets an empty source list without a
    /// rule scan.
    pub fn get_whitelists(&self, groups: &[String]) -> Result<Vec<IngressWhitelist>> {
        let inner = self.lock()?;
        let mut all = Vec::with_capacity(groups.len());

        for dest in groups {
            let Some(dest_tag) = inner.tags.get(dest) else {
                tracing::info!(group = %dest, "no-tag-found");
                all.push(IngressWhitelist::untagged(dest.as_str()));
                continue;
            };

            let allowed_sources = inner
                .rules
                .iter()
                .filter(|r| &r.destination == dest)
                .map(|r| TaggedGroup::new(r.source.as_str(), inner.tags.get(&r.source).cloned()))
                .collect();

            all.push(IngressWhitelist {
                destination: TaggedGroup::new(dest.as_str(), Some(dest_tag.clone())),
                allowed_sources,
            });
        }

        tracing::debug!(count = all.len(), "built-whitelist");
        Ok(all)
    }
}
