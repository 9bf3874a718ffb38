//! Core types for the API closure engine.

pub mod name;
pub mod declared;
pub mod entity;
pub mod declaration;

pub use name::QualifiedName;
pub use declared::{CallableType, Constituent, DeclaredType};
pub use entity::{
    ArgKind, ClassEntity, Entity, FunctionEntity, Scope, UnsupportedEntity, ValueEntity,
};
pub use declaration::{AssignTarget, Declaration, ModuleDeclarations};
