//! In-cluster service account discovery.
//!
//! # Responsibilities
//! - Pick up the pod's service account token
//! - Derive the API server address from the injected service variables
//! - Pick up the cluster CA bundle
//!
//! # Design Decisions
//! - Best effort: a missing or unreadable source is treated as absent
//! - Values found here override the configuration file

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::env::Environment;
use crate::config::schema::PartialConfig;

pub const SA_TOKEN_FILE: &str = "/var/run/secrets/kubernetes.io/serviceaccount/token";
pub const SA_CACERT_FILE: &str = "/var/run/secrets/kubernetes.io/serviceaccount/ca.crt";

pub const ENV_SERVICE_HOST: &str = "KUBERNETES_SERVICE_HOST";
pub const ENV_SERVICE_PORT: &str = "KUBERNETES_SERVICE_PORT";

/// Locations of the service account credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccount {
    pub token_file: PathBuf,
    pub ca_file: PathBuf,
}

impl Default for ServiceAccount {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(SA_TOKEN_FILE),
            ca_file: PathBuf::from(SA_CACERT_FILE),
        }
    }
}

impl ServiceAccount {
    /// Service account files under `dir`, named as the kubelet names them.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            token_file: dir.join("token"),
            ca_file: dir.join("ca.crt"),
        }
    }
}

/// Apply service account credentials on top of `partial`.
pub fn apply_service_account(
    mut partial: PartialConfig,
    account: &ServiceAccount,
    env: &dyn Environment,
) -> PartialConfig {
    if let Some(token) = read_token(&account.token_file) {
        tracing::debug!(path = %account.token_file.display(), "Using service account token");
        partial.token = Some(token);

        if let Some(server) = service_endpoint(env) {
            tracing::debug!(server = %server, "Using in-cluster API server");
            partial.server = Some(server);
        }
    }

    if account.ca_file.exists() {
        tracing::debug!(path = %account.ca_file.display(), "Using service account CA bundle");
        partial.tls_ca_file = Some(account.ca_file.clone());
    }

    partial
}

/// First line of the token file, or `None` if it cannot be read or is empty.
fn read_token(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut line = String::new();
    match BufReader::new(file).read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// `https://<host>:<port>` when both service variables are set.
fn service_endpoint(env: &dyn Environment) -> Option<String> {
    let host = env.get(ENV_SERVICE_HOST).ok().flatten()?;
    let port = env.get(ENV_SERVICE_PORT).ok().flatten()?;
    Some(format!("https://{host}:{port}"))
}
