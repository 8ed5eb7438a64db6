//! Configuration loading.
//!
//! Runs the resolution stages in precedence order:
//! defaults → file → service account → environment → validation.

use std::path::{Path, PathBuf};

use crate::config::env::{apply_environment, Environment, ProcessEnv};
use crate::config::error::ConfigError;
use crate::config::file::apply_file;
use crate::config::schema::{IngressConfig, PartialConfig};
use crate::config::service_account::{apply_service_account, ServiceAccount};
use crate::config::validation::finalize;

/// Directory used to qualify bare configuration file names.
pub const DEFAULT_CONFIG_DIR: &str = "/etc/trafficserver";

/// Resolves [`IngressConfig`] snapshots from all configuration sources.
pub struct ConfigLoader {
    config_dir: PathBuf,
    service_account: ServiceAccount,
    env: Box<dyn Environment + Send + Sync>,
}

impl ConfigLoader {
    /// Loader reading the process environment and the well-known paths.
    pub fn new() -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            service_account: ServiceAccount::default(),
            env: Box::new(ProcessEnv),
        }
    }

    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir = dir.into();
        self
    }

    pub fn with_service_account(mut self, account: ServiceAccount) -> Self {
        self.service_account = account;
        self
    }

    pub fn with_env(mut self, env: impl Environment + Send + Sync + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Resolve a configuration snapshot.
    ///
    /// `file` is optional; when given it must exist and parse. Any error
    /// aborts the whole resolution.
    pub fn load(&self, file: Option<&Path>) -> Result<IngressConfig, ConfigError> {
        let mut partial = PartialConfig::default();

        if let Some(file) = file {
            partial = apply_file(partial, file, &self.config_dir)?;
        }

        let partial = apply_service_account(partial, &self.service_account, self.env.as_ref());
        let partial = apply_environment(partial, self.env.as_ref())?;
        let config = finalize(partial)?;

        tracing::debug!(
            server = %config.server(),
            classes = %config.ingress_classes(),
            "Configuration resolved"
        );
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .field("service_account", &self.service_account)
            .finish_non_exhaustive()
    }
}

/// Resolve a configuration snapshot from the default sources.
pub fn load_config(file: Option<&Path>) -> Result<IngressConfig, ConfigError> {
    ConfigLoader::new().load(file)
}
