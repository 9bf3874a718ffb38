//! Snapshot projection and artifacts.
//!
//! A snapshot is the diff-stable description of a closure: one entry per
//! discovered entity, keyed and sorted by fully-qualified name, rendered in
//! one of two profiles.
//!
//! ## Determinism Guarantees
//!
//! - Entry keys are sorted lexicographically (BTreeMap)
//! - Nested keys serialize in struct declaration order
//! - List fields keep catalog declaration order

pub mod record;
pub mod writer;

pub use record::{describe, ClassRecord, FunctionRecord, SnapshotRecord, ValueRecord};
pub use writer::write_atomic;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::canonical::canonical_hash_hex;
use crate::closure::Closure;
use crate::types::QualifiedName;

/// Error type for snapshot rendering and writing.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// Rendering failed.
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    /// Writing failed; the destination was not modified.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The destination has no file name.
    #[error("Invalid artifact path: {0}")]
    InvalidPath(String),
}

/// Serialization profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Field-level records; the compatibility contract.
    #[default]
    Minimal,
    /// One descriptive string per entity, for older tooling.
    FullString,
}

/// A profile name that matches no known profile.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile: {0}")]
pub struct UnknownProfile(pub String);

impl FromStr for Profile {
    type Err = UnknownProfile;

    /// Case-insensitive; an empty string selects the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" | "" => Ok(Self::Minimal),
            "full-string" | "full_string" | "full" | "legacy" => Ok(Self::FullString),
            _ => Err(UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimal => write!(f, "minimal"),
            Self::FullString => write!(f, "full-string"),
        }
    }
}

/// One snapshot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotEntry {
    /// Minimal-profile record.
    Record(SnapshotRecord),
    /// Full-string-profile text.
    Text(String),
}

/// The projected public surface of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    profile: Profile,
    entries: BTreeMap<QualifiedName, SnapshotEntry>,
    derivation: BTreeMap<QualifiedName, Vec<QualifiedName>>,
}

impl Snapshot {
    /// Project every discovered entity with the given profile.
    ///
    /// Entities of unsupported kinds have no projection and are left out of
    /// both the entries and the derivation.
    pub fn project(closure: &Closure<'_>, profile: Profile) -> Self {
        let mut entries = BTreeMap::new();
        let mut derivation = BTreeMap::new();

        for (name, discovered) in closure.iter() {
            let entry = match profile {
                Profile::Minimal => SnapshotRecord::project(discovered.entity).map(SnapshotEntry::Record),
                Profile::FullString => describe(discovered.entity).map(SnapshotEntry::Text),
            };
            let Some(entry) = entry else {
                continue;
            };
            entries.insert(name.clone(), entry);
            derivation.insert(name.clone(), discovered.chain.clone());
        }

        Self {
            profile,
            entries,
            derivation,
        }
    }

    /// Profile used for the entries.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&SnapshotEntry> {
        self.entries.get(name)
    }

    /// Reachability chain for a discovered name.
    pub fn chain(&self, name: &str) -> Option<&[QualifiedName]> {
        self.derivation.get(name).map(Vec::as_slice)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.entries.keys()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the surface is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot artifact text: a pretty JSON object with a trailing newline.
    pub fn to_artifact_string(&self) -> Result<String, SnapshotError> {
        let mut out = serde_json::to_string_pretty(&self.entries)?;
        out.push('\n');
        Ok(out)
    }

    /// The derivation artifact text: name -> ordered chain of names.
    pub fn derivation_artifact_string(&self) -> Result<String, SnapshotError> {
        let mut out = serde_json::to_string_pretty(&self.derivation)?;
        out.push('\n');
        Ok(out)
    }

    /// Stable hash of the entries, for cheap drift checks.
    pub fn fingerprint(&self) -> Result<String, SnapshotError> {
        Ok(canonical_hash_hex(&self.entries)?)
    }

    /// Atomically write the snapshot artifact.
    pub fn write_to(&self, path: &Path) -> Result<(), SnapshotError> {
        write_atomic(path, &self.to_artifact_string()?)
    }

    /// Atomically write the derivation artifact.
    pub fn write_derivation_to(&self, path: &Path) -> Result<(), SnapshotError> {
        write_atomic(path, &self.derivation_artifact_string()?)
    }
}
