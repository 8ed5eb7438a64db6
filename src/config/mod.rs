//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! PartialConfig::default()
//!     → file.rs            (optional key: value file)
//!     → service_account.rs (in-cluster token, endpoint, CA bundle)
//!     → env.rs             (TS_* overrides)
//!     → validation.rs      (cross-field checks, freeze)
//!     → IngressConfig      (validated, immutable)
//!     → shared via SharedConfig to the rest of the component
//!
//! On reload signal:
//!     watcher.rs or SIGHUP requests a reload
//!     → loader.rs resolves a new snapshot from scratch
//!     → atomic swap in SharedConfig, or keep the current one on error
//! ```
//!
//! # Design Decisions
//! - Later stages override earlier ones field by field
//! - Invariants are checked once, after the last stage
//! - Config is immutable once resolved; changes require full reload

pub mod classes;
pub mod env;
pub mod error;
pub mod file;
pub mod loader;
pub mod parse;
pub mod schema;
pub mod service_account;
pub mod shared;
pub mod validation;
pub mod watcher;

pub use classes::IngressClasses;
pub use env::{Environment, ProcessEnv};
pub use error::{ConfigError, SyntaxError, ValidationError};
pub use loader::{load_config, ConfigLoader};
pub use schema::{ClientCert, ConfigMapRef, IngressConfig, PartialConfig};
pub use service_account::ServiceAccount;
pub use shared::SharedConfig;
