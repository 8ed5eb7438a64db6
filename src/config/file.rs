//! Configuration file parser.
//!
//! # Format
//! ```text
//! # comment
//! server: https://10.0.0.1:6443
//! tls_verify: false
//! ingress_classes: public internal
//! configmap: ingress/ts-config
//! ```
//! One `key: value` directive per line. No quoting, escaping, or multi-line
//! values. The value runs verbatim to the end of the line after leading
//! whitespace is skipped.
//!
//! # Design Decisions
//! - Stops at the first bad line; the caller discards the partial record
//! - Lines over [`MAX_LINE_LEN`] bytes are rejected rather than split

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::config::error::{ConfigError, SyntaxError};
use crate::config::parse::{is_format_space, parse_bool};
use crate::config::schema::PartialConfig;

/// Longest accepted line, excluding the line terminator.
pub const MAX_LINE_LEN: usize = 1024;

/// Qualify a bare file name with the configuration directory.
///
/// Names containing a `/` are used as given.
pub fn resolve_path(path: &Path, config_dir: &Path) -> PathBuf {
    if path.to_string_lossy().contains('/') {
        path.to_path_buf()
    } else {
        config_dir.join(path)
    }
}

/// Apply the configuration file at `path` on top of `partial`.
pub fn apply_file(
    partial: PartialConfig,
    path: &Path,
    config_dir: &Path,
) -> Result<PartialConfig, ConfigError> {
    let path = resolve_path(path, config_dir);
    let file = File::open(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "Reading configuration file");
    apply_reader(partial, BufReader::new(file), &path)
}

/// Apply directives read from `reader`. `path` is only used in diagnostics.
pub fn apply_reader<R: BufRead>(
    mut partial: PartialConfig,
    mut reader: R,
    path: &Path,
) -> Result<PartialConfig, ConfigError> {
    let mut buf = String::new();
    let mut line = 0;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if read == 0 {
            break;
        }
        line += 1;

        let text = buf.trim_end_matches(['\r', '\n']);
        let result = if text.len() > MAX_LINE_LEN {
            Err(SyntaxError::LineTooLong { max: MAX_LINE_LEN })
        } else {
            apply_directive(&mut partial, text)
        };

        result.map_err(|kind| ConfigError::Syntax {
            path: path.to_path_buf(),
            line,
            kind,
        })?;
    }

    Ok(partial)
}

/// Apply a single line. Blank lines and `#` comments are ignored.
fn apply_directive(partial: &mut PartialConfig, line: &str) -> Result<(), SyntaxError> {
    let line = line.trim_start_matches(is_format_space);
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let (key, value) = line.split_once(':').ok_or(SyntaxError::MissingSeparator)?;
    let value = value.trim_start_matches(is_format_space);

    match key {
        "server" => partial.server = Some(value.to_string()),
        "token" => partial.token = Some(value.to_string()),
        "certfile" => partial.tls_cert_file = Some(PathBuf::from(value)),
        "keyfile" => partial.tls_key_file = Some(PathBuf::from(value)),
        "cafile" => partial.tls_ca_file = Some(PathBuf::from(value)),
        "tls" => partial.tls = parse_bool(value)?,
        "tls_verify" => partial.tls_verify = parse_bool(value)?,
        "remap" => partial.remap = parse_bool(value)?,
        "x_forwarded_proto" => partial.x_forwarded_proto = parse_bool(value)?,
        "ingress_classes" => partial.replace_ingress_classes(value),
        "configmap" => partial.configmap = Some(value.parse()?),
        _ => return Err(SyntaxError::UnknownOption(key.to_string())),
    }

    Ok(())
}
