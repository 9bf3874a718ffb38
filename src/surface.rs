//! Initial public surface built from collected hints.

use std::collections::BTreeMap;

use crate::catalog::TypeCatalog;
use crate::diagnostics::{Diagnostics, UnsupportedSite};
use crate::hints::HintCollector;
use crate::policy::ScopePolicy;
use crate::types::{Entity, QualifiedName};
use crate::visibility::{is_private_attribute_name, is_private_class_name, is_private_function_name};

/// Confirmed public entities that seed the closure, keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct InitialSurface<'c> {
    entries: BTreeMap<QualifiedName, &'c Entity>,
}

impl<'c> InitialSurface<'c> {
    /// Build the initial surface.
    ///
    /// ## Algorithm
    ///
    /// 1. Drop hints matching an exclude prefix
    /// 2. Resolve each remaining hint; unresolvable hints are skipped
    /// 3. Classes: skip private ones; otherwise add the class and every
    ///    public member declared directly in its body
    /// 4. Functions and values: add unless private
    /// 5. Unsupported kinds go to `diagnostics`
    pub fn build<C: TypeCatalog + ?Sized>(
        hints: &HintCollector,
        scope: &ScopePolicy,
        catalog: &'c C,
        diagnostics: &mut Diagnostics,
    ) -> Self {
        let mut surface = Self::default();

        for hint in hints.iter() {
            if scope.in_excluded(hint.as_str()) {
                tracing::debug!(hint = %hint, "hint excluded");
                continue;
            }
            let Some(entity) = catalog.lookup(hint.as_str()) else {
                tracing::debug!(hint = %hint, "hint not found in catalog");
                continue;
            };
            let name = entity.name();
            if name.is_empty() {
                continue;
            }

            match entity {
                Entity::Class(class) => {
                    if is_private_class_name(name.as_str()) {
                        continue;
                    }
                    surface.insert(entity);
                    for member in class.member_names() {
                        if is_private_attribute_name(member.as_str()) {
                            continue;
                        }
                        match catalog.lookup(member.as_str()) {
                            Some(item) if !item.name().is_empty() => surface.insert(item),
                            _ => tracing::debug!(member = %member, "member not found in catalog"),
                        }
                    }
                }
                Entity::Function(_) => {
                    if !is_private_function_name(name.as_str()) {
                        surface.insert(entity);
                    }
                }
                Entity::Value(_) => {
                    if !is_private_attribute_name(name.as_str()) {
                        surface.insert(entity);
                    }
                }
                Entity::Unsupported(u) => {
                    diagnostics.unsupported(name, UnsupportedSite::Entity, u.catalog_kind.as_str());
                }
            }
        }

        surface
    }

    fn insert(&mut self, entity: &'c Entity) {
        self.entries.insert(entity.name().clone(), entity);
    }

    /// Whether `name` is on the surface.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the surface is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entities in name order.
    pub fn entities(&self) -> impl Iterator<Item = &'c Entity> + '_ {
        self.entries.values().copied()
    }
}
