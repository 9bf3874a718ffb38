//! In-memory type catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::{CatalogError, TypeCatalog};
use crate::types::{Entity, QualifiedName};

/// In-memory type catalog.
///
/// Uses BTreeMap for deterministic iteration order. Aliases model re-exports:
/// `pkg.Thing -> pkg.internal.Thing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryTypeCatalog {
    /// Entities by canonical name.
    #[serde(default)]
    entities: BTreeMap<QualifiedName, Entity>,
    /// Alias -> target name.
    #[serde(default)]
    aliases: BTreeMap<QualifiedName, QualifiedName>,
}

impl InMemoryTypeCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an entity under its canonical name, replacing any previous one.
    pub fn add(&mut self, entity: impl Into<Entity>) {
        let entity = entity.into();
        self.entities.insert(entity.name().clone(), entity);
    }

    /// Builder-style [`add`](Self::add).
    pub fn with(mut self, entity: impl Into<Entity>) -> Self {
        self.add(entity);
        self
    }

    /// Register `alias` as another name for `target`.
    pub fn add_alias(&mut self, alias: impl Into<QualifiedName>, target: impl Into<QualifiedName>) {
        self.aliases.insert(alias.into(), target.into());
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the catalog has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// All entities in name order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

impl TypeCatalog for InMemoryTypeCatalog {
    fn lookup(&self, name: &str) -> Option<&Entity> {
        if let Some(entity) = self.entities.get(name) {
            return Some(entity);
        }

        // Follow alias chains; a cycle resolves to nothing.
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut current = name;
        while let Some(target) = self.aliases.get(current) {
            if !seen.insert(current) {
                tracing::debug!(name, "alias cycle in catalog");
                return None;
            }
            if let Some(entity) = self.entities.get(target.as_str()) {
                return Some(entity);
            }
            current = target.as_str();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassEntity, Scope, ValueEntity};

    #[test]
    fn test_add_and_lookup() {
        let catalog = InMemoryTypeCatalog::new()
            .with(ClassEntity::new("pkg.A", Scope::Module));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup("pkg.A").map(|e| e.name().as_str()), Some("pkg.A"));
        assert!(catalog.lookup("pkg.B").is_none());
    }

    #[test]
    fn test_alias_resolves_to_canonical() {
        let mut catalog = InMemoryTypeCatalog::new()
            .with(ClassEntity::new("pkg.internal.Thing", Scope::Module));
        catalog.add_alias("pkg.a.Thing", "pkg.Thing");
        catalog.add_alias("pkg.Thing", "pkg.internal.Thing");

        let entity = catalog.lookup("pkg.a.Thing").unwrap();
        assert_eq!(entity.name().as_str(), "pkg.internal.Thing");
    }

    #[test]
    fn test_alias_cycle_is_absent() {
        let mut catalog = InMemoryTypeCatalog::new();
        catalog.add_alias("a.X", "b.X");
        catalog.add_alias("b.X", "a.X");

        assert!(catalog.lookup("a.X").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "entities": {
                "pkg.x": {"kind": "value", "name": "pkg.x", "declared_type": {"form": "plain", "name": "builtins.int"}}
            }
        }"#;
        let catalog = InMemoryTypeCatalog::from_json(json).unwrap();
        assert_eq!(
            catalog.lookup("pkg.x"),
            Some(&Entity::from(ValueEntity::new(
                "pkg.x",
                Scope::Module,
                Some(crate::types::DeclaredType::plain("builtins.int")),
            )))
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            InMemoryTypeCatalog::from_json("{\"entities\": 3}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
