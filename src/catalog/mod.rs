//! Type catalog backends.
//!
//! The catalog is the type checker's symbol table seen from the outside: a
//! read-only lookup from fully-qualified name to [`Entity`]. The engine never
//! mutates it.

pub mod memory;
pub mod dump;

use crate::types::Entity;

/// Read-only symbol table keyed by fully-qualified name.
///
/// Lookups may resolve aliases (re-exports); the returned entity always
/// carries its canonical name. Implementations must be deterministic: class
/// members and type constituents are consumed in the order they expose them.
pub trait TypeCatalog {
    /// Resolve a fully-qualified name, or `None` if it is unknown.
    fn lookup(&self, name: &str) -> Option<&Entity>;
}

impl<C: TypeCatalog + ?Sized> TypeCatalog for &C {
    fn lookup(&self, name: &str) -> Option<&Entity> {
        (**self).lookup(name)
    }
}

/// Error type for catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Dump could not be read.
    #[error("Failed to read catalog dump {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Dump is not valid JSON for the expected shape.
    #[error("Malformed catalog dump: {0}")]
    Parse(#[from] serde_json::Error),
}

pub use memory::InMemoryTypeCatalog;
pub use dump::CatalogDump;
