//! Declared types as reported by the type catalog.
//!
//! A declared type is a closed sum: adding a new form is a compile-time
//! decision for every match in the crate. Types the front end cannot express
//! in these forms arrive as [`DeclaredType::Unsupported`] and are surfaced as
//! diagnostics during expansion.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::ArgKind;
use super::name::QualifiedName;

/// A declared (annotated or inferred) type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum DeclaredType {
    /// A bare nominal type, e.g. `builtins.int` or `pkg.internal.Thing`.
    Plain {
        /// Fully-qualified name of the type.
        name: QualifiedName,
    },
    /// A parameterized nominal type, e.g. `builtins.dict[builtins.str, pkg.X]`.
    Generic {
        /// The container type.
        base: QualifiedName,
        /// Type arguments in declaration order.
        args: Vec<DeclaredType>,
    },
    /// A union of alternatives.
    Union {
        /// Branches in declaration order.
        items: Vec<DeclaredType>,
    },
    /// A fixed-shape tuple or type list.
    Tuple {
        /// Items in declaration order.
        items: Vec<DeclaredType>,
    },
    /// A callable signature.
    Callable(CallableType),
    /// The none type.
    None,
    /// A form the catalog could not express in the variants above.
    Unsupported {
        /// Printed form of the type, used for diagnostics.
        description: String,
    },
}

/// A callable signature: parallel argument vectors plus return type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallableType {
    /// Argument kinds, one per parameter.
    pub arg_kinds: Vec<ArgKind>,
    /// Argument names, one per parameter (`None` for anonymous parameters).
    pub arg_names: Vec<Option<String>>,
    /// Argument types, one per parameter.
    pub arg_types: Vec<DeclaredType>,
    /// Return type.
    pub ret_type: Box<DeclaredType>,
}

/// A piece of a declared type that the closure expander may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constituent<'a> {
    /// A nominal type name that may resolve to a catalog entity.
    Name(&'a QualifiedName),
    /// A type form that cannot be decomposed.
    Unsupported(&'a str),
}

impl DeclaredType {
    /// Shorthand for a plain nominal type.
    pub fn plain(name: impl Into<QualifiedName>) -> Self {
        Self::Plain { name: name.into() }
    }

    /// Shorthand for a parameterized type.
    pub fn generic(base: impl Into<QualifiedName>, args: Vec<DeclaredType>) -> Self {
        Self::Generic { base: base.into(), args }
    }

    /// Shorthand for a union type.
    pub fn union(items: Vec<DeclaredType>) -> Self {
        Self::Union { items }
    }

    /// Every referenced type name in declaration order (pre-order).
    ///
    /// Unions and tuples contribute each item; generics contribute the
    /// container itself followed by each argument; callables contribute their
    /// return type followed by each argument type. The none type contributes
    /// nothing.
    pub fn constituents(&self) -> Vec<Constituent<'_>> {
        let mut out = Vec::new();
        self.push_constituents(&mut out);
        out
    }

    fn push_constituents<'a>(&'a self, out: &mut Vec<Constituent<'a>>) {
        match self {
            Self::Plain { name } => out.push(Constituent::Name(name)),
            Self::Generic { base, args } => {
                out.push(Constituent::Name(base));
                for arg in args {
                    arg.push_constituents(out);
                }
            }
            Self::Union { items } | Self::Tuple { items } => {
                for item in items {
                    item.push_constituents(out);
                }
            }
            Self::Callable(callable) => callable.push_constituents(out),
            Self::None => {}
            Self::Unsupported { description } => out.push(Constituent::Unsupported(description)),
        }
    }
}

impl CallableType {
    /// Create a callable signature.
    ///
    /// The argument vectors are expected to be the same length.
    pub fn new(
        arg_kinds: Vec<ArgKind>,
        arg_names: Vec<Option<String>>,
        arg_types: Vec<DeclaredType>,
        ret_type: DeclaredType,
    ) -> Self {
        Self {
            arg_kinds,
            arg_names,
            arg_types,
            ret_type: Box::new(ret_type),
        }
    }

    /// Referenced names: return type first, then each argument type.
    pub fn constituents(&self) -> Vec<Constituent<'_>> {
        let mut out = Vec::new();
        self.push_constituents(&mut out);
        out
    }

    fn push_constituents<'a>(&'a self, out: &mut Vec<Constituent<'a>>) {
        self.ret_type.push_constituents(out);
        for arg in &self.arg_types {
            arg.push_constituents(out);
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[DeclaredType]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain { name } => write!(f, "{name}"),
            Self::Generic { base, args } => {
                write!(f, "{base}[")?;
                write_list(f, args)?;
                f.write_str("]")
            }
            Self::Union { items } => {
                f.write_str("Union[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Self::Tuple { items } => {
                f.write_str("Tuple[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Self::Callable(callable) => write!(f, "{callable}"),
            Self::None => f.write_str("None"),
            Self::Unsupported { description } => f.write_str(description),
        }
    }
}

impl fmt::Display for CallableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("def (")?;
        let mut seen_star = false;
        for (i, arg_type) in self.arg_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let kind = self.arg_kinds.get(i).copied().unwrap_or_default();
            if kind.is_named() && !seen_star {
                f.write_str("*, ")?;
                seen_star = true;
            }
            match kind {
                ArgKind::Star => {
                    f.write_str("*")?;
                    seen_star = true;
                }
                ArgKind::Star2 => f.write_str("**")?,
                _ => {}
            }
            if let Some(Some(name)) = self.arg_names.get(i) {
                write!(f, "{name}: ")?;
            }
            write!(f, "{arg_type}")?;
            if kind.is_optional() {
                f.write_str(" =")?;
            }
        }
        f.write_str(")")?;
        if *self.ret_type != DeclaredType::None {
            write!(f, " -> {}", self.ret_type)?;
        }
        Ok(())
    }
}
