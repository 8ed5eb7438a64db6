//! Configuration file watcher for hot reload.
//!
//! The parent directory is watched rather than the file itself: editors and
//! ConfigMap volume updates replace the file, which drops a watch placed on
//! the old inode.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::lifecycle::reload::ReloadReason;

/// Symlink the kubelet swaps when a ConfigMap volume changes.
const CONFIGMAP_DATA_LINK: &str = "..data";

/// A watcher that monitors the configuration file for changes.
///
/// It only signals that a reload is due; the reloader decides whether the new
/// contents are accepted.
pub struct ConfigWatcher {
    path: PathBuf,
    reload_tx: mpsc::UnboundedSender<ReloadReason>,
}

impl ConfigWatcher {
    pub fn new(path: &Path, reload_tx: mpsc::UnboundedSender<ReloadReason>) -> Self {
        Self {
            path: path.to_path_buf(),
            reload_tx,
        }
    }

    /// Start watching. Events stop when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.reload_tx;
        let dir = watch_dir(&self.path).to_path_buf();
        let file_name = self.path.file_name().map(OsStr::to_os_string);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_relevant(&event, file_name.as_deref()) => {
                    tracing::info!(kind = ?event.kind, "Config file change detected");
                    let _ = tx.send(ReloadReason::FileChanged);
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Config watcher started");
        Ok(watcher)
    }
}

fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn is_relevant(event: &Event, file_name: Option<&OsStr>) -> bool {
    let kind_matches = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );

    kind_matches
        && event.paths.iter().any(|path| {
            let name = path.file_name();
            name == file_name || name == Some(OsStr::new(CONFIGMAP_DATA_LINK))
        })
}
