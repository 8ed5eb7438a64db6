//! Environment variable overrides.
//!
//! Every variable listed here, when set, replaces whatever the file or the
//! service account established for its field.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::error::ConfigError;
use crate::config::parse::{parse_bool, ValueError};
use crate::config::schema::{ConfigMapRef, PartialConfig};

pub const ENV_SERVER: &str = "TS_SERVER";
pub const ENV_CAFILE: &str = "TS_CAFILE";
pub const ENV_CERTFILE: &str = "TS_CERTFILE";
pub const ENV_KEYFILE: &str = "TS_KEYFILE";
pub const ENV_TOKEN: &str = "TS_TOKEN";
pub const ENV_TLS: &str = "TS_TLS";
pub const ENV_TLS_VERIFY: &str = "TS_TLS_VERIFY";
pub const ENV_REMAP: &str = "TS_REMAP";
pub const ENV_CONFIGMAP: &str = "TS_CONFIGMAP";
pub const ENV_INGRESS_CLASSES: &str = "TS_INGRESS_CLASSES";

/// Source of environment variables.
pub trait Environment {
    /// Retrieves the value of `key`, or `None` when it is unset.
    fn get(&self, key: &'static str) -> Result<Option<String>, ConfigError>;
}

/// Reads the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(std::env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode { var: key }),
        }
    }
}

impl Environment for HashMap<&'static str, &'static str> {
    fn get(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok(HashMap::get(self, key).map(ToString::to_string))
    }
}

impl Environment for HashMap<String, String> {
    fn get(&self, key: &'static str) -> Result<Option<String>, ConfigError> {
        Ok(HashMap::get(self, key).cloned())
    }
}

/// Apply the `TS_*` overrides on top of `partial`.
pub fn apply_environment(
    mut partial: PartialConfig,
    env: &dyn Environment,
) -> Result<PartialConfig, ConfigError> {
    if let Some(server) = env.get(ENV_SERVER)? {
        partial.server = Some(server);
    }
    if let Some(ca) = env.get(ENV_CAFILE)? {
        partial.tls_ca_file = Some(PathBuf::from(ca));
    }
    if let Some(cert) = env.get(ENV_CERTFILE)? {
        partial.tls_cert_file = Some(PathBuf::from(cert));
    }
    if let Some(key) = env.get(ENV_KEYFILE)? {
        partial.tls_key_file = Some(PathBuf::from(key));
    }
    if let Some(token) = env.get(ENV_TOKEN)? {
        partial.token = Some(token);
    }

    if let Some(tls) = parse(env, ENV_TLS, parse_bool)? {
        partial.tls = tls;
    }
    if let Some(verify) = parse(env, ENV_TLS_VERIFY, parse_bool)? {
        partial.tls_verify = verify;
    }
    if let Some(remap) = parse(env, ENV_REMAP, parse_bool)? {
        partial.remap = remap;
    }
    if let Some(configmap) = parse(env, ENV_CONFIGMAP, str::parse::<ConfigMapRef>)? {
        partial.configmap = Some(configmap);
    }

    if let Some(classes) = env.get(ENV_INGRESS_CLASSES)? {
        partial.replace_ingress_classes(&classes);
    }

    Ok(partial)
}

fn parse<T>(
    env: &dyn Environment,
    var: &'static str,
    parse: impl FnOnce(&str) -> Result<T, ValueError>,
) -> Result<Option<T>, ConfigError> {
    match env.get(var)? {
        Some(value) => match parse(&value) {
            Ok(parsed) => {
                tracing::debug!(var, value = %value, "Environment override");
                Ok(Some(parsed))
            }
            Err(kind) => Err(ConfigError::Environment { var, value, kind }),
        },
        None => Ok(None),
    }
}
