//! Configuration validation.
//!
//! # Responsibilities
//! - Resolve credential precedence (client certificate over bearer token)
//! - Require the certificate and key together
//! - Require a server address
//!
//! # Design Decisions
//! - Runs once, after every source has been merged
//! - Reports the first violated rule, checked in a fixed order
//! - Consumes the partial record, so nothing half-valid escapes

use crate::config::error::ValidationError;
use crate::config::schema::{ClientCert, IngressConfig, PartialConfig};

/// Validate `partial` and freeze it into an [`IngressConfig`].
pub fn finalize(partial: PartialConfig) -> Result<IngressConfig, ValidationError> {
    let PartialConfig {
        server,
        mut token,
        tls_cert_file,
        tls_key_file,
        tls_ca_file,
        tls,
        tls_verify,
        remap,
        x_forwarded_proto,
        configmap,
        ingress_classes,
    } = partial;

    if tls_key_file.is_some() {
        token = None;
    }

    let client_cert = match (tls_cert_file, tls_key_file) {
        (Some(cert_file), Some(key_file)) => Some(ClientCert { cert_file, key_file }),
        (None, Some(_)) => return Err(ValidationError::KeyWithoutCert),
        (Some(_), None) => return Err(ValidationError::CertWithoutKey),
        (None, None) => None,
    };

    let server = match server {
        Some(server) if !server.is_empty() => server,
        _ => return Err(ValidationError::MissingServer),
    };

    Ok(IngressConfig {
        server,
        token,
        tls_ca_file,
        tls,
        tls_verify,
        remap,
        x_forwarded_proto,
        ingress_classes,
        client_cert,
        configmap,
    })
}
