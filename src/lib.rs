//! # api-surface
//!
//! Deterministic public API closure and snapshotting for typed codebases.
//!
//! The crate answers one question:
//!
//! > Given a set of analyzed modules, what can a consumer actually reach?
//!
//! ## Core Contract
//!
//! 1. Collect candidate names from each module's top-level declarations
//! 2. Confirm the public ones against a resolved type catalog
//! 3. Expand the surface through every type a public signature mentions,
//!    including private types that leak through it
//! 4. Emit a stable, sorted snapshot that diffs cleanly between versions
//!
//! ## Architecture
//!
//! ```text
//! Declarations → HintCollector → InitialSurface → ClosureExpander → Snapshot
//!                                       ↓                ↓
//!                                  TypeCatalog (host-provided or JSON dump)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Same declarations + same catalog + same config → byte-identical artifact
//! - Snapshot keys sort lexicographically
//! - Expansion is breadth-first, so recorded chains are shortest chains

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod visibility;
pub mod policy;
pub mod catalog;
pub mod hints;
pub mod diagnostics;
pub mod surface;
pub mod closure;
pub mod snapshot;
pub mod session;
pub mod config;
pub mod canonical;

// Re-exports
pub use types::{
    ArgKind, AssignTarget, CallableType, ClassEntity, Declaration, DeclaredType, Entity,
    FunctionEntity, ModuleDeclarations, QualifiedName, Scope, UnsupportedEntity, ValueEntity,
};
pub use visibility::{
    is_private_attribute_name, is_private_class_name, is_private_function_name,
    is_private_module_path,
};
pub use policy::{ScopePolicy, UnsupportedPolicy};
pub use catalog::{CatalogDump, CatalogError, InMemoryTypeCatalog, TypeCatalog};
pub use hints::HintCollector;
pub use diagnostics::{Diagnostics, UnsupportedKind, UnsupportedSite};
pub use surface::InitialSurface;
pub use closure::{Closure, ClosureError, ClosureExpander, Discovered};
pub use snapshot::{Profile, Snapshot, SnapshotEntry, SnapshotError, SnapshotRecord, UnknownProfile};
pub use session::{LifecycleHooks, Session, SessionError};
pub use config::{SurfaceConfig, DEFAULT_OUTPUT_PATH};
pub use canonical::{canonical_hash, canonical_hash_hex, to_canonical_bytes};
