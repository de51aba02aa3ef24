//! Shared application state for the policy server.
//!
//! Owns the tagger and rule store. Built once in `main` and handed to every
//! handler through axum `State`; there is no global store.

use std::sync::Arc;

use netpolicy_core::error::Result;
use netpolicy_core::store::{MemoryTagger, RuleStore};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: RuleStore,
}

impl AppState {
    /// Build application state.
    /// Returns Result so main can report a bad tag length instead of panicking.
    pub fn new(cfg: &ServerConfig) -> Result<Self> {
        let tagger = Arc::new(MemoryTagger::new(cfg.store.tag_length)?);
        tracing::info!(
            listen = %cfg.server.listen,
            tag_length = tagger.tag_length(),
            capacity = tagger.capacity(),
            "rule store ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store: RuleStore::new(tagger),
            }),
        })
    }

    pub fn store(&self) -> &RuleStore {
        &self.inner.store
    }
}
