//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config and lifecycle produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (reload counters, snapshot gauges)
//! ```
//!
//! # Design Decisions
//! - Resolution code returns errors; callers decide how to log them
//! - Metrics are cheap when no recorder is installed

pub mod logging;
pub mod metrics;
