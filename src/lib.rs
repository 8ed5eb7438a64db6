//! Startup configuration for a Kubernetes ingress controller embedded in an
//! edge proxy.
//!
//! Resolves an [`IngressConfig`] from a configuration file, the in-cluster
//! service account, and `TS_*` environment overrides, in that order of
//! increasing precedence.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::{load_config, ConfigError, ConfigLoader, IngressConfig, SharedConfig};
