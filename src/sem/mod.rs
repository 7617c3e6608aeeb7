//! Semantic model: type catalogs, scopes, and expression binding.
//!
//! The original design leaned on a full compiler-services layer for
//! "resolve the static type of a sub-expression and enumerate members
//! visible on it". Here that role is played by a lightweight type table:
//! assembly catalogs declare types and members, a [`SemanticScope`]
//! merges the referenced catalogs with the imported namespaces and
//! session locals, and the binder walks an expression down to a type.

mod assembly;
mod binder;
mod corelib;
mod literal;
mod model;
mod scope;

pub use assembly::{
    AssemblyCatalog, AssemblyCatalogBuilder, AssemblyRegistry, ReferenceSet, TypeBuilder,
};
pub use binder::{bind_expr, Binding};
pub use corelib::{core_catalog, CORE_ASSEMBLY_NAMES};
pub use literal::{try_parse_literal, LiteralKind, LiteralValue, TimeSpanValue};
pub use model::{ExtensionMethodDef, MemberDef, SymbolInfo, SymbolKind, TypeDef, TypeId};
pub use scope::{ImportedNamespaces, LocalVariable, SemanticScope};
