//! Ingress class selection set.
//!
//! # Responsibilities
//! - Hold the ingress class names this instance acts on
//! - Replace the whole set from a whitespace-separated string
//!
//! # Design Decisions
//! - Membership-only semantics; ordering is kept sorted for stable logs
//! - Replacement is always total, never an incremental merge

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Class honored when no source names one.
pub const DEFAULT_INGRESS_CLASS: &str = "trafficserver";

/// Separators accepted between class names.
const CLASS_SEPARATORS: [char; 4] = [' ', '\t', '\r', '\n'];

/// Set of ingress class names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngressClasses(BTreeSet<String>);

impl IngressClasses {
    /// Build a set from a whitespace-separated list of class names.
    ///
    /// Runs of separators are collapsed and duplicates removed. An empty or
    /// all-whitespace input yields an empty set; callers decide what that means.
    pub fn parse(tokens: &str) -> Self {
        let classes: BTreeSet<String> = tokens
            .split(&CLASS_SEPARATORS[..])
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .collect();

        let classes = Self(classes);
        tracing::debug!(classes = %classes, "Ingress classes parsed");
        classes
    }

    pub fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for IngressClasses {
    fn default() -> Self {
        Self(BTreeSet::from([DEFAULT_INGRESS_CLASS.to_string()]))
    }
}

impl fmt::Display for IngressClasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(class)?;
        }
        Ok(())
    }
}
