//! Configuration schema definitions.
//!
//! [`PartialConfig`] is the record threaded through the resolution stages;
//! [`IngressConfig`] is the validated snapshot handed to the rest of the
//! component. Only [`crate::config::validation::finalize`] turns one into the
//! other.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use url::Url;

use crate::config::classes::IngressClasses;
use crate::config::parse::{parse_pair, ValueError};

/// Reference to the ConfigMap holding extra settings, written `namespace/name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigMapRef {
    pub namespace: String,
    pub name: String,
}

impl FromStr for ConfigMapRef {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = parse_pair(s, '/')?;
        Ok(Self { namespace, name })
    }
}

impl fmt::Display for ConfigMapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Client certificate and key used to authenticate to the API server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCert {
    /// Path to certificate file (PEM).
    pub cert_file: PathBuf,

    /// Path to private key file (PEM).
    pub key_file: PathBuf,
}

/// Configuration under construction.
///
/// Each resolution stage takes it by value and hands it back, so a stage that
/// fails drops everything built so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialConfig {
    /// Base URL of the API server.
    pub server: Option<String>,

    /// Bearer token.
    pub token: Option<String>,

    pub tls_cert_file: Option<PathBuf>,
    pub tls_key_file: Option<PathBuf>,
    pub tls_ca_file: Option<PathBuf>,

    /// Use TLS to talk to the API server.
    pub tls: bool,

    /// Verify the API server certificate.
    pub tls_verify: bool,

    /// Install remap rules for Ingress resources.
    pub remap: bool,

    /// Add an `X-Forwarded-Proto` header to proxied requests.
    pub x_forwarded_proto: bool,

    pub configmap: Option<ConfigMapRef>,

    pub ingress_classes: IngressClasses,
}

impl Default for PartialConfig {
    fn default() -> Self {
        Self {
            server: None,
            token: None,
            tls_cert_file: None,
            tls_key_file: None,
            tls_ca_file: None,
            tls: true,
            tls_verify: true,
            remap: true,
            x_forwarded_proto: true,
            configmap: None,
            ingress_classes: IngressClasses::default(),
        }
    }
}

impl PartialConfig {
    /// Replace the ingress class set from a whitespace-separated list.
    ///
    /// A list with no class names leaves the current set in place so the set
    /// is never empty.
    pub fn replace_ingress_classes(&mut self, tokens: &str) {
        let classes = IngressClasses::parse(tokens);
        if classes.is_empty() {
            tracing::warn!(
                current = %self.ingress_classes,
                "Empty ingress class list ignored"
            );
            return;
        }
        self.ingress_classes = classes;
    }
}

/// Validated configuration snapshot.
///
/// Immutable once built; a reload produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngressConfig {
    pub(crate) server: String,

    #[serde(serialize_with = "redact", skip_serializing_if = "Option::is_none")]
    pub(crate) token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tls_ca_file: Option<PathBuf>,

    pub(crate) tls: bool,
    pub(crate) tls_verify: bool,
    pub(crate) remap: bool,
    pub(crate) x_forwarded_proto: bool,
    pub(crate) ingress_classes: IngressClasses,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) client_cert: Option<ClientCert>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) configmap: Option<ConfigMapRef>,
}

impl IngressConfig {
    pub fn server(&self) -> &str {
        &self.server
    }

    /// Parse the server address as a URL.
    pub fn server_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.server)
    }

    /// Bearer token; always `None` when a client certificate is configured.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn client_cert(&self) -> Option<&ClientCert> {
        self.client_cert.as_ref()
    }

    pub fn tls_ca_file(&self) -> Option<&Path> {
        self.tls_ca_file.as_deref()
    }

    pub fn tls(&self) -> bool {
        self.tls
    }

    pub fn tls_verify(&self) -> bool {
        self.tls_verify
    }

    pub fn remap(&self) -> bool {
        self.remap
    }

    pub fn x_forwarded_proto(&self) -> bool {
        self.x_forwarded_proto
    }

    pub fn configmap(&self) -> Option<&ConfigMapRef> {
        self.configmap.as_ref()
    }

    pub fn ingress_classes(&self) -> &IngressClasses {
        &self.ingress_classes
    }
}

fn redact<S: Serializer>(token: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match token {
        Some(_) => serializer.serialize_str("<redacted>"),
        None => serializer.serialize_none(),
    }
}
