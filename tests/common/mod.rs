//! Shared utilities for configuration resolution tests.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use ts_ingress_config::config::service_account::{ENV_SERVICE_HOST, ENV_SERVICE_PORT};
use ts_ingress_config::config::ServiceAccount;
use ts_ingress_config::{ConfigError, ConfigLoader, IngressConfig};

/// Scratch config directory, service account directory and environment.
pub struct Fixture {
    dir: TempDir,
    env: HashMap<String, String>,
}

#[allow(dead_code)]
impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("serviceaccount")).unwrap();
        Self {
            dir,
            env: HashMap::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `name` inside the config directory.
    pub fn write_config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn service_account_token(&self, token: &str) -> &Self {
        fs::write(self.service_account_dir().join("token"), token).unwrap();
        self
    }

    pub fn service_account_ca(&self) -> PathBuf {
        let path = self.service_account_dir().join("ca.crt");
        fs::write(&path, "-----BEGIN CERTIFICATE-----\n").unwrap();
        path
    }

    pub fn in_cluster(&mut self, host: &str, port: &str) -> &mut Self {
        self.set_env(ENV_SERVICE_HOST, host).set_env(ENV_SERVICE_PORT, port)
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    pub fn loader(&self) -> ConfigLoader {
        ConfigLoader::new()
            .with_config_dir(self.dir.path())
            .with_service_account(ServiceAccount::in_dir(&self.service_account_dir()))
            .with_env(self.env.clone())
    }

    pub fn load(&self, file: Option<&str>) -> Result<IngressConfig, ConfigError> {
        self.loader().load(file.map(Path::new))
    }

    fn service_account_dir(&self) -> PathBuf {
        self.dir.path().join("serviceaccount")
    }
}
