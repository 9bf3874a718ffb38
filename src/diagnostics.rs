//! Unsupported-kind diagnostics.
//!
//! Entity or type kinds the engine does not model could hide part of the
//! true surface. Lenient runs log and skip them; strict runs collect them and
//! fail at finalize time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::policy::UnsupportedPolicy;
use crate::types::QualifiedName;

/// Where an unsupported kind was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsupportedSite {
    /// The catalog returned an entity of an unmodeled kind.
    Entity,
    /// A declared type could not be decomposed.
    Type,
}

impl fmt::Display for UnsupportedSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::Type => write!(f, "type"),
        }
    }
}

/// One unsupported kind, attributed to the entity being processed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnsupportedKind {
    /// Entity whose processing met the kind.
    pub owner: QualifiedName,
    /// Entity or type.
    pub site: UnsupportedSite,
    /// Catalog kind label or printed type.
    pub description: String,
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} in {}", self.site, self.description, self.owner)
    }
}

/// Collected diagnostics for one run, de-duplicated and sorted.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    policy: UnsupportedPolicy,
    unsupported: BTreeSet<UnsupportedKind>,
}

impl Diagnostics {
    /// Create an empty diagnostics sink for the given policy.
    pub fn new(policy: UnsupportedPolicy) -> Self {
        Self {
            policy,
            unsupported: BTreeSet::new(),
        }
    }

    /// Record an unsupported kind.
    pub fn unsupported(
        &mut self,
        owner: &QualifiedName,
        site: UnsupportedSite,
        description: impl Into<String>,
    ) {
        let kind = UnsupportedKind {
            owner: owner.clone(),
            site,
            description: description.into(),
        };
        if self.policy.is_strict() {
            tracing::warn!(
                owner = %kind.owner,
                site = %kind.site,
                description = %kind.description,
                "unsupported kind, run will fail"
            );
        } else {
            tracing::debug!(
                owner = %kind.owner,
                site = %kind.site,
                description = %kind.description,
                "not yet supported, skipping"
            );
        }
        self.unsupported.insert(kind);
    }

    /// Unsupported kinds in sorted order.
    pub fn unsupported_kinds(&self) -> impl Iterator<Item = &UnsupportedKind> {
        self.unsupported.iter()
    }

    /// Number of distinct unsupported kinds recorded.
    pub fn len(&self) -> usize {
        self.unsupported.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.unsupported.is_empty()
    }

    /// The kinds that should fail the run under the current policy.
    pub fn failures(&self) -> Option<Vec<UnsupportedKind>> {
        if self.policy.is_strict() && !self.unsupported.is_empty() {
            Some(self.unsupported.iter().cloned().collect())
        } else {
            None
        }
    }
}
