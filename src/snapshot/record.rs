//! Per-entity snapshot records.
//!
//! A record keeps only the facts whose change can break a consumer:
//! parameter kinds, names and types for callables; bases and MRO for classes;
//! the declared type for values. Docstrings, locations and bodies never make
//! it into the catalog, let alone the record.

use serde::{Deserialize, Serialize};

use crate::types::{ArgKind, Entity, QualifiedName, Scope};

/// Minimal-profile record for a function or method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Definition scope.
    pub kind: Scope,
    /// Parameter kinds, in order.
    pub arg_kinds: Vec<ArgKind>,
    /// Parameter names, in order.
    pub arg_names: Vec<Option<String>>,
    /// Parameter types, in order; absent for unannotated functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg_types: Option<Vec<String>>,
    /// Return type; absent for unannotated functions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ret_type: Option<String>,
}

/// Minimal-profile record for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Definition scope.
    pub kind: Scope,
    /// Declared bases, in declaration order.
    pub bases: Vec<String>,
    /// Linearized MRO, the class itself first.
    pub mro: Vec<QualifiedName>,
}

/// Minimal-profile record for a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRecord {
    /// Declared type, if known.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<String>,
}

/// A minimal-profile record.
///
/// Serialized without a tag: the field set identifies the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotRecord {
    /// Function or method.
    Function(FunctionRecord),
    /// Class.
    Class(ClassRecord),
    /// Variable.
    Value(ValueRecord),
}

impl SnapshotRecord {
    /// Project an entity; unsupported kinds have no record.
    pub fn project(entity: &Entity) -> Option<Self> {
        match entity {
            Entity::Function(f) => Some(Self::Function(FunctionRecord {
                kind: f.scope,
                arg_kinds: f.arg_kinds.clone(),
                arg_names: f.arg_names.clone(),
                arg_types: f
                    .signature
                    .as_ref()
                    .map(|sig| sig.arg_types.iter().map(ToString::to_string).collect()),
                ret_type: f.signature.as_ref().map(|sig| sig.ret_type.to_string()),
            })),
            Entity::Class(c) => Some(Self::Class(ClassRecord {
                kind: c.scope,
                bases: c.bases.iter().map(ToString::to_string).collect(),
                mro: c.mro.clone(),
            })),
            Entity::Value(v) => Some(Self::Value(ValueRecord {
                declared_type: v.declared_type.as_ref().map(ToString::to_string),
            })),
            Entity::Unsupported(_) => None,
        }
    }
}

/// Full-string profile: one descriptive line per entity, e.g.
/// `Gdef/FuncDef (pkg.fn) : def (a: builtins.int) -> builtins.int`.
pub fn describe(entity: &Entity) -> Option<String> {
    match entity {
        Entity::Function(f) => {
            let node = if f.decorated { "Decorator" } else { "FuncDef" };
            let mut out = format!("{}/{} ({})", f.scope.legacy_tag(), node, f.name);
            if let Some(sig) = &f.signature {
                out.push_str(&format!(" : {sig}"));
            }
            Some(out)
        }
        Entity::Class(c) => Some(format!("{}/TypeInfo ({})", c.scope.legacy_tag(), c.name)),
        Entity::Value(v) => {
            let mut out = format!("{}/Var ({})", v.scope.legacy_tag(), v.name);
            if let Some(ty) = &v.declared_type {
                out.push_str(&format!(" : {ty}"));
            }
            Some(out)
        }
        Entity::Unsupported(_) => None,
    }
}
