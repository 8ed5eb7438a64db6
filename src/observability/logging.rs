//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Written to stderr so stdout stays free for the resolved snapshot
//! - `RUST_LOG` takes precedence over the directive passed in

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `default_directive` is used when `RUST_LOG` is unset or invalid.
pub fn init_logging(default_directive: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
