//! Catalog dumps: a type checker's output serialized for standalone runs.
//!
//! A dump pairs the per-module top-level declarations (what the host would
//! report as each module is processed) with the resolved catalog.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{CatalogError, InMemoryTypeCatalog};
use crate::types::ModuleDeclarations;

/// Modules in processing order plus the resolved catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDump {
    /// Processed modules, in the order the host reported them.
    #[serde(default)]
    pub modules: Vec<ModuleDeclarations>,
    /// Resolved symbol table.
    #[serde(default)]
    pub catalog: InMemoryTypeCatalog,
}

impl CatalogDump {
    /// Parse a dump from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dump file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }
}
