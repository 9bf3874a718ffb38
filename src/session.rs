//! Two-phase analysis session.
//!
//! A host drives the session in two steps: `collect` once per analyzed
//! module while its declarations are available, then `finalize` once every
//! module's type information is complete. All state lives in the session,
//! so concurrent runs never share anything.
//!
//! ```text
//! collect(module) ... collect(module) → finalize(catalog) → Snapshot
//!                                           ↓
//!                 InitialSurface → ClosureExpander → Snapshot::project
//! ```

use crate::catalog::{CatalogError, TypeCatalog};
use crate::closure::{ClosureError, ClosureExpander};
use crate::config::SurfaceConfig;
use crate::diagnostics::Diagnostics;
use crate::hints::HintCollector;
use crate::policy::ScopePolicy;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::surface::InitialSurface;
use crate::types::Declaration;

/// Error type for session runs.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Closure expansion failed.
    #[error(transparent)]
    Closure(#[from] ClosureError),
    /// Rendering or writing an artifact failed.
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
    /// Loading the catalog failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// One analysis run.
#[derive(Debug, Clone)]
pub struct Session {
    config: SurfaceConfig,
    scope: ScopePolicy,
    hints: HintCollector,
}

impl Session {
    /// Start a session.
    pub fn new(config: SurfaceConfig) -> Self {
        let scope = config.scope();
        tracing::debug!(
            includes = ?scope.includes(),
            excludes = ?scope.excludes(),
            profile = %config.profile,
            unsupported = %config.unsupported,
            "session started"
        );
        Self {
            config,
            scope,
            hints: HintCollector::new(),
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The validated scope.
    pub fn scope(&self) -> &ScopePolicy {
        &self.scope
    }

    /// Hints collected so far.
    pub fn hints(&self) -> &HintCollector {
        &self.hints
    }

    /// Record hints for one processed module; returns the number added.
    pub fn collect(&mut self, module: &str, declarations: &[Declaration]) -> usize {
        self.hints.collect(&self.scope, module, declarations)
    }

    /// Build the surface, expand it and project the snapshot.
    ///
    /// Does not write anything. In strict mode, any unsupported kind met
    /// on the way fails the run.
    pub fn finalize<C: TypeCatalog + ?Sized>(&self, catalog: &C) -> Result<Snapshot, SessionError> {
        let mut diagnostics = Diagnostics::new(self.config.unsupported);

        let initial = InitialSurface::build(&self.hints, &self.scope, catalog, &mut diagnostics);
        let closure = ClosureExpander::new(catalog, &self.scope).expand(&initial, &mut diagnostics);

        if let Some(failures) = diagnostics.failures() {
            return Err(ClosureError::Unsupported(failures).into());
        }

        let snapshot = Snapshot::project(&closure, self.config.profile);
        let fingerprint = snapshot.fingerprint()?;
        tracing::info!(
            hints = self.hints.len(),
            initial_surface = initial.len(),
            closure = closure.len(),
            entries = snapshot.len(),
            unsupported = diagnostics.len(),
            scope_hash = %self.scope.params_hash(),
            fingerprint = %fingerprint,
            "public surface finalized"
        );
        Ok(snapshot)
    }

    /// Write the snapshot and, if enabled, the derivation artifact.
    pub fn write_artifacts(&self, snapshot: &Snapshot) -> Result<(), SessionError> {
        snapshot.write_to(&self.config.output_path)?;
        if let Some(path) = &self.config.derivation_output_path {
            snapshot.write_derivation_to(path)?;
        }
        tracing::info!(
            path = %self.config.output_path.display(),
            entries = snapshot.len(),
            "wrote public surface"
        );
        Ok(())
    }
}

/// Callbacks a host checker invokes over its lifecycle.
pub trait LifecycleHooks {
    /// Called once per analyzed module with its top-level declarations.
    fn on_module_processed(&mut self, module: &str, declarations: &[Declaration]);

    /// Called once when the host run completes and all types are resolved.
    fn on_run_finalized<C: TypeCatalog + ?Sized>(&mut self, catalog: &C) -> Result<Snapshot, SessionError>;
}

impl LifecycleHooks for Session {
    fn on_module_processed(&mut self, module: &str, declarations: &[Declaration]) {
        self.collect(module, declarations);
    }

    /// Finalize, write the artifacts, then reset the hints so the session
    /// can serve another run.
    fn on_run_finalized<C: TypeCatalog + ?Sized>(&mut self, catalog: &C) -> Result<Snapshot, SessionError> {
        let snapshot = self.finalize(catalog)?;
        self.write_artifacts(&snapshot)?;
        self.hints.clear();
        Ok(snapshot)
    }
}
