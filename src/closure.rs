//! Closure expansion over type references.
//!
//! The expander walks outward from the initial surface through every type a
//! consumer is forced to depend on, including internal entities that leak
//! through public signatures.

use std::collections::{BTreeMap, VecDeque};

use crate::catalog::TypeCatalog;
use crate::diagnostics::{Diagnostics, UnsupportedKind, UnsupportedSite};
use crate::policy::ScopePolicy;
use crate::surface::InitialSurface;
use crate::types::{Constituent, Entity, QualifiedName};
use crate::visibility::is_private_attribute_name;

/// Error type for closure runs.
#[derive(Debug, thiserror::Error)]
pub enum ClosureError {
    /// Strict mode met entity or type kinds the engine does not model.
    #[error("{} unsupported kind(s) in strict mode: {}", .0.len(), join(.0))]
    Unsupported(Vec<UnsupportedKind>),
}

fn join(kinds: &[UnsupportedKind]) -> String {
    kinds.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// An entity reached by the closure.
#[derive(Debug, Clone)]
pub struct Discovered<'c> {
    /// The entity.
    pub entity: &'c Entity,
    /// Names from an initial-surface entity down to this one.
    ///
    /// Acyclic; the last element is always the entity's own name.
    pub chain: Vec<QualifiedName>,
}

/// The full reachable set, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct Closure<'c> {
    discovered: BTreeMap<QualifiedName, Discovered<'c>>,
}

impl<'c> Closure<'c> {
    /// Look up a discovered entity.
    pub fn get(&self, name: &str) -> Option<&Discovered<'c>> {
        self.discovered.get(name)
    }

    /// Whether `name` was reached.
    pub fn contains(&self, name: &str) -> bool {
        self.discovered.contains_key(name)
    }

    /// Number of discovered entities.
    pub fn len(&self) -> usize {
        self.discovered.len()
    }

    /// Whether nothing was reached.
    pub fn is_empty(&self) -> bool {
        self.discovered.is_empty()
    }

    /// Discovered entities in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&QualifiedName, &Discovered<'c>)> {
        self.discovered.iter()
    }

    /// Discovered names in name order.
    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.discovered.keys()
    }
}

/// Breadth-first closure expander.
///
/// ## Algorithm
///
/// 1. Seed a FIFO worklist with every initial-surface entity and an empty chain
/// 2. Pop the front; skip it if unnamed or already visited
/// 3. Mark visited and record it with its chain
/// 4. Enqueue neighbours with the chain extended by this entity:
///    - Function: every in-scope name in the return and argument types
///    - Class: every non-private member, then every in-scope MRO ancestor
///    - Value: every in-scope name in the declared type
///
/// FIFO order means the first visit is along a shortest chain, and the
/// visited check keeps self-referential types from looping.
pub struct ClosureExpander<'c, C: TypeCatalog + ?Sized> {
    catalog: &'c C,
    scope: &'c ScopePolicy,
}

impl<'c, C: TypeCatalog + ?Sized> ClosureExpander<'c, C> {
    /// Create an expander over a catalog and scope.
    pub fn new(catalog: &'c C, scope: &'c ScopePolicy) -> Self {
        Self { catalog, scope }
    }

    /// Expand the initial surface into its full closure.
    pub fn expand(&self, initial: &InitialSurface<'c>, diagnostics: &mut Diagnostics) -> Closure<'c> {
        let mut closure = Closure::default();
        let mut worklist: VecDeque<(Vec<QualifiedName>, &'c Entity)> =
            initial.entities().map(|e| (Vec::new(), e)).collect();

        while let Some((parent_chain, entity)) = worklist.pop_front() {
            let name = entity.name();
            if name.is_empty() || closure.discovered.contains_key(name.as_str()) {
                continue;
            }

            let mut chain = parent_chain;
            chain.push(name.clone());

            match entity {
                Entity::Function(function) => {
                    if let Some(signature) = &function.signature {
                        self.follow(name, signature.constituents(), &chain, &mut worklist, diagnostics);
                    }
                }
                Entity::Class(class) => {
                    for member in class.member_names() {
                        if is_private_attribute_name(member.as_str()) {
                            continue;
                        }
                        self.enqueue(&member, &chain, &mut worklist);
                    }
                    for ancestor in class.ancestors() {
                        if self.scope.in_includes(ancestor.as_str()) {
                            self.enqueue(ancestor, &chain, &mut worklist);
                        }
                    }
                }
                Entity::Value(value) => {
                    if let Some(ty) = &value.declared_type {
                        self.follow(name, ty.constituents(), &chain, &mut worklist, diagnostics);
                    }
                }
                Entity::Unsupported(u) => {
                    diagnostics.unsupported(name, UnsupportedSite::Entity, u.catalog_kind.as_str());
                }
            }

            closure
                .discovered
                .insert(name.clone(), Discovered { entity, chain });
        }

        closure
    }

    fn follow(
        &self,
        owner: &QualifiedName,
        constituents: Vec<Constituent<'_>>,
        chain: &[QualifiedName],
        worklist: &mut VecDeque<(Vec<QualifiedName>, &'c Entity)>,
        diagnostics: &mut Diagnostics,
    ) {
        for constituent in constituents {
            match constituent {
                Constituent::Name(type_name) => {
                    if self.scope.in_includes(type_name.as_str()) {
                        self.enqueue(type_name, chain, worklist);
                    }
                }
                Constituent::Unsupported(description) => {
                    diagnostics.unsupported(owner, UnsupportedSite::Type, description);
                }
            }
        }
    }

    fn enqueue(
        &self,
        name: &QualifiedName,
        chain: &[QualifiedName],
        worklist: &mut VecDeque<(Vec<QualifiedName>, &'c Entity)>,
    ) {
        match self.catalog.lookup(name.as_str()) {
            Some(entity) => worklist.push_back((chain.to_vec(), entity)),
            None => tracing::debug!(name = %name, "reference not found in catalog"),
        }
    }
}
