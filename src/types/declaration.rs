//! Top-level declarations reported by the host for each processed module.
//!
//! These arrive before member and attribute types are resolved, so they only
//! carry names.

use serde::{Deserialize, Serialize};

/// A top-level statement in a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decl", rename_all = "snake_case")]
pub enum Declaration {
    /// `def name(...)`.
    Function {
        /// Local name.
        name: String,
    },
    /// A function wrapped in decorators.
    Decorated {
        /// Local name.
        name: String,
    },
    /// `class name(...)`.
    Class {
        /// Local name.
        name: String,
    },
    /// `a = b = value`: one target per `=`.
    Assignment {
        /// Assignment targets in source order.
        targets: Vec<AssignTarget>,
    },
    /// Any other statement (imports, conditionals, expressions, ...).
    Other {
        /// Host-side statement label, for logs.
        kind: String,
    },
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "value", rename_all = "snake_case")]
pub enum AssignTarget {
    /// A plain name.
    Name(String),
    /// A tuple or list unpacking target.
    Tuple(Vec<AssignTarget>),
    /// Attribute, subscript or starred targets.
    Other(String),
}

impl Declaration {
    /// Shorthand for a plain function.
    pub fn function(name: impl Into<String>) -> Self {
        Self::Function { name: name.into() }
    }

    /// Shorthand for a decorated function.
    pub fn decorated(name: impl Into<String>) -> Self {
        Self::Decorated { name: name.into() }
    }

    /// Shorthand for a class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class { name: name.into() }
    }

    /// Shorthand for `name = ...`.
    pub fn assign(name: impl Into<String>) -> Self {
        Self::Assignment {
            targets: vec![AssignTarget::Name(name.into())],
        }
    }
}

/// All top-level declarations of one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDeclarations {
    /// Fully-qualified module name.
    pub module: String,
    /// Declarations in source order.
    #[serde(default)]
    pub declarations: Vec<Declaration>,
}
