//! Error types for configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::parse::ValueError;

/// A malformed line in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("syntax error")]
    MissingSeparator,

    #[error("unknown option \"{0}\"")]
    UnknownOption(String),

    #[error("line longer than {max} bytes")]
    LineTooLong { max: usize },

    #[error(transparent)]
    Value(#[from] ValueError),
}

/// A cross-field invariant violated after all sources were merged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("must specify certfile with keyfile")]
    KeyWithoutCert,

    #[error("must specify keyfile with certfile")]
    CertWithoutKey,

    #[error("must specify server")]
    MissingServer,
}

/// Error type for configuration resolution.
///
/// Every variant carries enough context (path, line, or variable name) to
/// locate the offending input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {kind}", path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        kind: SyntaxError,
    },

    #[error("${var}: {kind}, not \"{value}\"")]
    Environment {
        var: &'static str,
        value: String,
        kind: ValueError,
    },

    #[error("${var} is not valid unicode")]
    NotUnicode { var: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
