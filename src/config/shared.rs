//! Shared handle to the current configuration snapshot.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::IngressConfig;

/// Current [`IngressConfig`], replaced atomically on reload.
///
/// Readers always see a complete snapshot: either the one before a reload or
/// the one after it.
#[derive(Debug)]
pub struct SharedConfig {
    inner: ArcSwap<IngressConfig>,
}

impl SharedConfig {
    pub fn new(config: IngressConfig) -> Self {
        Self {
            inner: ArcSwap::from_pointee(config),
        }
    }

    /// Snapshot of the current configuration.
    pub fn load(&self) -> Arc<IngressConfig> {
        self.inner.load_full()
    }

    /// Install `config` and return the snapshot it replaced.
    pub fn replace(&self, config: IngressConfig) -> Arc<IngressConfig> {
        self.inner.swap(Arc::new(config))
    }
}
