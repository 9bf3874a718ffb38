//! Catalog entities: functions, classes and values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::declared::{CallableType, DeclaredType};
use super::name::QualifiedName;

/// Where a symbol is defined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Defined at module level.
    #[default]
    Module,
    /// Defined inside a class body.
    Member,
}

impl Scope {
    /// Tag used by the full-string profile.
    pub fn legacy_tag(&self) -> &'static str {
        match self {
            Self::Module => "Gdef",
            Self::Member => "Mdef",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Member => write!(f, "member"),
        }
    }
}

/// How an argument is passed.
///
/// Turning a keyword argument into a positional one (or the reverse) breaks
/// callers, so kinds are part of the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgKind {
    /// Required positional.
    #[default]
    Positional,
    /// Positional with a default.
    Optional,
    /// `*args`.
    Star,
    /// Required keyword-only.
    Named,
    /// Keyword-only with a default.
    NamedOptional,
    /// `**kwargs`.
    Star2,
}

impl ArgKind {
    /// Keyword-only kinds.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::Named | Self::NamedOptional)
    }

    /// Kinds that carry a default value.
    pub fn is_optional(&self) -> bool {
        matches!(self, Self::Optional | Self::NamedOptional)
    }
}

/// A function or method, possibly decorated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntity {
    /// Canonical fully-qualified name.
    pub name: QualifiedName,
    /// Definition scope.
    #[serde(default)]
    pub scope: Scope,
    /// Whether the definition is wrapped in decorators (e.g. a property).
    #[serde(default)]
    pub decorated: bool,
    /// Declared argument kinds.
    #[serde(default)]
    pub arg_kinds: Vec<ArgKind>,
    /// Declared argument names.
    #[serde(default)]
    pub arg_names: Vec<Option<String>>,
    /// Signature, when the function is annotated.
    #[serde(default)]
    pub signature: Option<CallableType>,
}

impl FunctionEntity {
    /// An annotated function; kinds and names are taken from the signature.
    pub fn typed(name: impl Into<QualifiedName>, scope: Scope, signature: CallableType) -> Self {
        Self {
            name: name.into(),
            scope,
            decorated: false,
            arg_kinds: signature.arg_kinds.clone(),
            arg_names: signature.arg_names.clone(),
            signature: Some(signature),
        }
    }

    /// An unannotated function.
    pub fn untyped(
        name: impl Into<QualifiedName>,
        scope: Scope,
        arg_kinds: Vec<ArgKind>,
        arg_names: Vec<Option<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            decorated: false,
            arg_kinds,
            arg_names,
            signature: None,
        }
    }

    /// Mark as decorated.
    pub fn decorated(mut self) -> Self {
        self.decorated = true;
        self
    }
}

/// A class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntity {
    /// Canonical fully-qualified name.
    pub name: QualifiedName,
    /// Definition scope.
    #[serde(default)]
    pub scope: Scope,
    /// Declared base types, in declaration order.
    #[serde(default)]
    pub bases: Vec<DeclaredType>,
    /// Linearized method resolution order, starting with the class itself.
    #[serde(default)]
    pub mro: Vec<QualifiedName>,
    /// Names declared directly in the class body, in declaration order.
    #[serde(default)]
    pub members: Vec<String>,
}

impl ClassEntity {
    /// Create a class with no bases or members.
    ///
    /// The MRO starts as just the class itself.
    pub fn new(name: impl Into<QualifiedName>, scope: Scope) -> Self {
        let name = name.into();
        Self {
            mro: vec![name.clone()],
            name,
            scope,
            bases: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Set declared bases.
    pub fn with_bases(mut self, bases: Vec<DeclaredType>) -> Self {
        self.bases = bases;
        self
    }

    /// Set the linearized MRO (the class itself first).
    pub fn with_mro<I, N>(mut self, mro: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<QualifiedName>,
    {
        self.mro = mro.into_iter().map(Into::into).collect();
        self
    }

    /// Set member names in declaration order.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members = members.into_iter().map(Into::into).collect();
        self
    }

    /// Fully-qualified names of the declared members, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = QualifiedName> + '_ {
        self.members.iter().map(|m| self.name.child(m))
    }

    /// Ancestors from the MRO, excluding the class itself.
    pub fn ancestors(&self) -> impl Iterator<Item = &QualifiedName> + '_ {
        self.mro.iter().filter(move |n| **n != self.name)
    }
}

/// A module-level or class-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueEntity {
    /// Canonical fully-qualified name.
    pub name: QualifiedName,
    /// Definition scope.
    #[serde(default)]
    pub scope: Scope,
    /// Declared type, when known.
    #[serde(default)]
    pub declared_type: Option<DeclaredType>,
}

impl ValueEntity {
    /// Create a value.
    pub fn new(
        name: impl Into<QualifiedName>,
        scope: Scope,
        declared_type: Option<DeclaredType>,
    ) -> Self {
        Self {
            name: name.into(),
            scope,
            declared_type,
        }
    }
}

/// An entity kind the catalog knows about but this crate does not model
/// (overload sets, type aliases, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsupportedEntity {
    /// Canonical fully-qualified name.
    pub name: QualifiedName,
    /// Catalog-side kind label.
    pub catalog_kind: String,
}

/// Anything nameable in the type catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    /// Function or method.
    Function(FunctionEntity),
    /// Class.
    Class(ClassEntity),
    /// Variable.
    Value(ValueEntity),
    /// Kind outside the modeled set.
    Unsupported(UnsupportedEntity),
}

impl Entity {
    /// Canonical fully-qualified name.
    pub fn name(&self) -> &QualifiedName {
        match self {
            Self::Function(f) => &f.name,
            Self::Class(c) => &c.name,
            Self::Value(v) => &v.name,
            Self::Unsupported(u) => &u.name,
        }
    }

    /// Short kind label for logs.
    pub fn kind_label(&self) -> &str {
        match self {
            Self::Function(_) => "function",
            Self::Class(_) => "class",
            Self::Value(_) => "value",
            Self::Unsupported(u) => &u.catalog_kind,
        }
    }
}

impl From<FunctionEntity> for Entity {
    fn from(f: FunctionEntity) -> Self {
        Self::Function(f)
    }
}

impl From<ClassEntity> for Entity {
    fn from(c: ClassEntity) -> Self {
        Self::Class(c)
    }
}

impl From<ValueEntity> for Entity {
    fn from(v: ValueEntity) -> Self {
        Self::Value(v)
    }
}

impl From<UnsupportedEntity> for Entity {
    fn from(u: UnsupportedEntity) -> Self {
        Self::Unsupported(u)
    }
}
