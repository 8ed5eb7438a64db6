//! Value parsers shared by the file parser and the environment layer.
//!
//! Both sources go through the same functions so a value accepted in one
//! place is accepted in the other.

use thiserror::Error;

/// A directive value that does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected \"true\" or \"false\"")]
    NotABool,

    #[error("expected \"<namespace>{sep}<name>\"")]
    NotAPair { sep: char },
}

/// Parse a boolean toggle. Only the exact literals `true` and `false` are accepted.
pub fn parse_bool(s: &str) -> Result<bool, ValueError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ValueError::NotABool),
    }
}

/// Split `s` into the parts before and after `sep`.
///
/// `sep` must occur exactly once.
pub fn parse_pair(s: &str, sep: char) -> Result<(String, String), ValueError> {
    match s.split_once(sep) {
        Some((first, second)) if !second.contains(sep) => {
            Ok((first.to_string(), second.to_string()))
        }
        _ => Err(ValueError::NotAPair { sep }),
    }
}

/// Whitespace as understood by the file format (C `isspace` in the "C" locale).
pub(crate) fn is_format_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
