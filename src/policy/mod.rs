//! Scope and strictness policies for a closure run.

pub mod scope;

pub use scope::{parse_prefix_list, ScopePolicy};

use serde::{Deserialize, Serialize};
use std::fmt;

/// What to do with entity or type kinds the engine does not model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedPolicy {
    /// Log and skip.
    #[default]
    Lenient,
    /// Fail the run at finalize time.
    Strict,
}

impl UnsupportedPolicy {
    /// Whether unsupported kinds fail the run.
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for UnsupportedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => write!(f, "lenient"),
            Self::Strict => write!(f, "strict"),
        }
    }
}
