//! OS signal handling.
//!
//! # Responsibilities
//! - SIGHUP → request a configuration reload
//! - SIGTERM/SIGINT → resolve the shutdown future
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP never terminates the process

use std::io;

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lifecycle::reload::ReloadReason;

/// Forward every SIGHUP as a reload request.
///
/// The handler is installed before this returns, so a SIGHUP delivered
/// afterwards is never lost. The task ends when the receiver is dropped.
pub fn spawn_reload_on_hangup(
    reload_tx: mpsc::UnboundedSender<ReloadReason>,
) -> io::Result<JoinHandle<()>> {
    let mut hangup = signal(SignalKind::hangup())?;

    Ok(tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            tracing::info!("SIGHUP received");
            if reload_tx.send(ReloadReason::Signal).is_err() {
                break;
            }
        }
    }))
}

/// Completes on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
