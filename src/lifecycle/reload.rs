//! Configuration reload.
//!
//! # Responsibilities
//! - Re-resolve the configuration from scratch on request
//! - Swap the new snapshot in atomically
//! - Keep the current snapshot when the new one fails to resolve
//!
//! # Design Decisions
//! - Requests that pile up while a reload runs are coalesced into one
//! - Identical snapshots are not swapped

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::{ConfigError, ConfigLoader, IngressConfig, SharedConfig};
use crate::observability::metrics;

/// Why a reload was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadReason {
    FileChanged,
    Signal,
}

impl fmt::Display for ReloadReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReloadReason::FileChanged => f.write_str("file changed"),
            ReloadReason::Signal => f.write_str("SIGHUP"),
        }
    }
}

/// Re-resolves the configuration and publishes it to a [`SharedConfig`].
pub struct Reloader {
    loader: Arc<ConfigLoader>,
    file: Option<PathBuf>,
    shared: Arc<SharedConfig>,
}

impl Reloader {
    pub fn new(loader: Arc<ConfigLoader>, file: Option<PathBuf>, shared: Arc<SharedConfig>) -> Self {
        Self { loader, file, shared }
    }

    /// Resolve a new snapshot and install it.
    ///
    /// On error the current snapshot stays active and the error is returned.
    pub fn reload(&self, reason: ReloadReason) -> Result<Arc<IngressConfig>, ConfigError> {
        let config = match self.loader.load(self.file.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(
                    reason = %reason,
                    "Failed to reload config: {}. Keeping current configuration.",
                    e
                );
                return Err(e);
            }
        };

        metrics::record_reload(true);

        let current = self.shared.load();
        if *current == config {
            tracing::debug!(reason = %reason, "Configuration unchanged");
            return Ok(current);
        }

        metrics::record_snapshot(&config);
        tracing::info!(
            reason = %reason,
            server = %config.server(),
            classes = %config.ingress_classes(),
            "Configuration reloaded"
        );
        self.shared.replace(config);
        Ok(self.shared.load())
    }

    /// Serve reload requests until `shutdown` completes or all senders are gone.
    pub async fn run<F>(self, mut requests: mpsc::UnboundedReceiver<ReloadReason>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                request = requests.recv() => {
                    let Some(mut reason) = request else { break };
                    while let Ok(next) = requests.try_recv() {
                        reason = next;
                    }
                    let _ = self.reload(reason);
                }
            }
        }

        tracing::info!("Reloader stopped");
    }
}
