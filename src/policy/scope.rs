//! Include/exclude prefix lists.
//!
//! Includes bound how far expansion may wander (keeping standard library and
//! third-party types out); excludes prune hints before the initial surface is
//! built and are never consulted during expansion.
//!
//! A prefix is a dot-separated run of non-empty segments, optionally ending
//! in a dot. Segments may hold any non-whitespace characters, so non-ASCII
//! module names and `$`-style nested names are accepted. Malformed prefixes
//! are dropped with a warning, so a bad configuration degrades to a smaller
//! surface instead of failing the run.

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::canonical::canonical_hash_hex;

fn prefix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s.]+(\.[^\s.]+)*\.?$")
            .expect("prefix pattern is a valid regex")
    })
}

/// Split a comma-separated prefix list, trimming entries and dropping empty
/// or malformed ones.
pub fn parse_prefix_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(validate_prefix)
        .collect()
}

fn validate_prefix(prefix: &str) -> Option<String> {
    if prefix_pattern().is_match(prefix) && !prefix.chars().any(char::is_whitespace) {
        Some(prefix.to_string())
    } else {
        tracing::warn!(prefix, "ignoring malformed name prefix");
        None
    }
}

/// Include and exclude prefix lists for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePolicy {
    includes: Vec<String>,
    excludes: Vec<String>,
}

impl ScopePolicy {
    /// Create a policy, validating every prefix.
    pub fn new<I, E, S, T>(includes: I, excludes: E) -> Self
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let clean = |p: &str| {
            let p = p.trim();
            if p.is_empty() {
                None
            } else {
                validate_prefix(p)
            }
        };
        Self {
            includes: includes.into_iter().filter_map(|p| clean(p.as_ref())).collect(),
            excludes: excludes.into_iter().filter_map(|p| clean(p.as_ref())).collect(),
        }
    }

    /// Create a policy from comma-separated lists.
    pub fn from_lists(includes: &str, excludes: &str) -> Self {
        Self {
            includes: parse_prefix_list(includes),
            excludes: parse_prefix_list(excludes),
        }
    }

    /// Include prefixes, in configured order.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Exclude prefixes, in configured order.
    pub fn excludes(&self) -> &[String] {
        &self.excludes
    }

    /// Whether `name` starts with any include prefix.
    ///
    /// With no includes configured nothing is in scope.
    pub fn in_includes(&self, name: &str) -> bool {
        self.includes.iter().any(|i| name.starts_with(i.as_str()))
    }

    /// Whether `name` starts with any exclude prefix.
    pub fn in_excluded(&self, name: &str) -> bool {
        self.excludes.iter().any(|e| name.starts_with(e.as_str()))
    }

    /// Stable hash of the configured prefixes.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(self).unwrap_or_default()
    }
}
