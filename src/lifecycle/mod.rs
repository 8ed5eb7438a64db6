//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Resolve config → fail fast on error → publish SharedConfig
//!
//! Reload (reload.rs):
//!     file change or SIGHUP → resolve from scratch → swap or keep current
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → stop the reloader and exit
//!     SIGHUP → trigger config reload
//! ```

pub mod reload;
pub mod signals;

pub use reload::{ReloadReason, Reloader};
