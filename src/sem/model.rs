//! Core semantic data types.

use smol_str::SmolStr;
use std::fmt;

/// Index of a type within a [`SemanticScope`](super::SemanticScope)'s
/// merged table. Only meaningful for the scope that produced it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TypeId(pub(crate) u32);

impl TypeId {
    #[inline]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Kind of a resolved symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Method,
    Property,
    Field,
    /// A method declared elsewhere but callable in member syntax on the
    /// receiver type (or a base of it).
    ExtensionMethod,
}

/// A member declared on a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberDef {
    pub name: SmolStr,
    pub kind: SymbolKind,
    pub is_static: bool,
    /// Fully-qualified name of the member's result type, if it has one.
    /// Drives chained resolution: `DateTime.Now.` needs `Now` to carry
    /// `System.DateTime`.
    pub result: Option<SmolStr>,
    /// Display signature, e.g. `AddDays(double value)`.
    pub signature: SmolStr,
}

/// A type declared by an assembly catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeDef {
    /// Namespace path, dot-separated. Empty for the global namespace.
    pub namespace: SmolStr,
    /// Simple name.
    pub name: SmolStr,
    /// Fully-qualified name of the base type, if any.
    pub base: Option<SmolStr>,
    pub members: Vec<MemberDef>,
}

impl TypeDef {
    /// The fully-qualified name, `Namespace.Name`.
    pub fn full_name(&self) -> SmolStr {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            SmolStr::new(format!("{}.{}", self.namespace, self.name))
        }
    }
}

/// An extension method: declared in some namespace, applicable to a
/// receiver type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionMethodDef {
    /// Namespace of the declaring static class. The method is only
    /// visible when this namespace is imported.
    pub namespace: SmolStr,
    pub name: SmolStr,
    /// Fully-qualified name of the receiver type. The method reduces
    /// onto the receiver type and everything derived from it.
    pub receiver: SmolStr,
    pub result: Option<SmolStr>,
    pub signature: SmolStr,
}

/// A resolved symbol as surfaced to the completion layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Fully-qualified name of the declaring type; for extension
    /// methods, the receiver type the method reduces onto.
    pub container: SmolStr,
    pub is_static: bool,
    pub signature: SmolStr,
}
