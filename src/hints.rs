//! Hint collection from per-module top-level declarations.
//!
//! Hints are candidate names recorded before member and attribute types are
//! resolved, so they only cover classes, functions and module-level names.
//! Exclude prefixes are not applied here; they prune hints when the initial
//! surface is built.

use std::collections::BTreeSet;

use crate::policy::ScopePolicy;
use crate::types::{AssignTarget, Declaration, QualifiedName};
use crate::visibility::is_private_module_path;

/// Accumulates hints across every processed module.
///
/// Uses BTreeSet so the surface builder sees hints in name order.
#[derive(Debug, Clone, Default)]
pub struct HintCollector {
    hints: BTreeSet<QualifiedName>,
}

impl HintCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record hints for one module.
    ///
    /// Modules outside the include scope, or whose path has a private
    /// segment, are skipped entirely. Returns the number of new hints.
    pub fn collect(
        &mut self,
        scope: &ScopePolicy,
        module: &str,
        declarations: &[Declaration],
    ) -> usize {
        if !scope.in_includes(module) {
            tracing::debug!(module, "module not in includes, skipping");
            return 0;
        }
        if is_private_module_path(module) {
            tracing::debug!(module, "private module, skipping");
            return 0;
        }

        let module = QualifiedName::new(module);
        let before = self.hints.len();
        for decl in declarations {
            match decl {
                Declaration::Function { name }
                | Declaration::Decorated { name }
                | Declaration::Class { name } => {
                    self.hints.insert(module.child(name));
                }
                Declaration::Assignment { targets } => {
                    for target in targets {
                        match target {
                            AssignTarget::Name(name) => {
                                self.hints.insert(module.child(name));
                            }
                            AssignTarget::Tuple(_) | AssignTarget::Other(_) => {
                                tracing::debug!(
                                    module = %module,
                                    target = ?target,
                                    "assignment target not yet supported"
                                );
                            }
                        }
                    }
                }
                Declaration::Other { kind } => {
                    tracing::trace!(module = %module, kind, "ignoring declaration");
                }
            }
        }

        let added = self.hints.len() - before;
        tracing::debug!(module = %module, added, total = self.hints.len(), "collected hints");
        added
    }

    /// Whether `name` has been hinted.
    pub fn contains(&self, name: &str) -> bool {
        self.hints.contains(name)
    }

    /// Number of hints.
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    /// Whether no hints have been collected.
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Hints in name order.
    pub fn iter(&self) -> impl Iterator<Item = &QualifiedName> {
        self.hints.iter()
    }

    /// Drop all hints.
    pub fn clear(&mut self) {
        self.hints.clear();
    }
}
