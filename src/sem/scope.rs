//! Per-resolution semantic scopes.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use crate::base::{Interner, Name};

use super::assembly::ReferenceSet;
use super::model::{ExtensionMethodDef, MemberDef, SymbolInfo, SymbolKind, TypeDef, TypeId};

/// The namespaces imported into the editing session, in order.
///
/// Rendered as `using` directives at the head of every synthetic
/// compilation unit. Uniqueness is not enforced; a duplicate import is
/// harmless, just wasteful.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportedNamespaces {
    namespaces: Vec<SmolStr>,
}

impl ImportedNamespaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, namespace: impl Into<SmolStr>) {
        self.namespaces.push(namespace.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.namespaces.iter().map(|ns| ns.as_str())
    }

    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    /// Render the `using` directive lines for the synthetic unit.
    pub fn render_directives(&self) -> String {
        let mut out = String::new();
        for ns in &self.namespaces {
            out.push_str("using ");
            out.push_str(ns);
            out.push_str(";\n");
        }
        out
    }

    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}

impl<S: Into<SmolStr>> FromIterator<S> for ImportedNamespaces {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            namespaces: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A variable in scope for the editing session, with its declared type.
///
/// These come from the hosting context (e.g. workflow variables), not
/// from the expression text itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalVariable {
    pub name: SmolStr,
    /// Fully-qualified name of the declared type.
    pub type_name: SmolStr,
}

impl LocalVariable {
    pub fn new(name: impl Into<SmolStr>, type_name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// The read-only view one resolution call works against: referenced
/// catalogs merged into a single type table, plus imports and locals.
///
/// Built fresh per call and discarded afterwards; nothing here is
/// cached across keystrokes.
pub struct SemanticScope<'a> {
    imports: &'a ImportedNamespaces,
    locals: &'a [LocalVariable],
    references: &'a ReferenceSet,
    /// Merged type list; first catalog wins on a duplicate full name.
    types: Vec<&'a TypeDef>,
    interner: Interner,
    by_full_name: rustc_hash::FxHashMap<Name, TypeId>,
}

impl<'a> SemanticScope<'a> {
    pub fn new(
        references: &'a ReferenceSet,
        imports: &'a ImportedNamespaces,
        locals: &'a [LocalVariable],
    ) -> Self {
        let mut scope = Self {
            imports,
            locals,
            references,
            types: Vec::new(),
            interner: Interner::new(),
            by_full_name: rustc_hash::FxHashMap::default(),
        };

        for catalog in references.catalogs() {
            for ty in catalog.types() {
                let name = scope.interner.intern(&ty.full_name());
                if !scope.by_full_name.contains_key(&name) {
                    let id = TypeId::new(scope.types.len() as u32);
                    scope.types.push(ty);
                    scope.by_full_name.insert(name, id);
                }
            }
        }

        scope
    }

    /// Look up a type by fully-qualified name.
    pub fn type_by_full_name(&self, full: &str) -> Option<TypeId> {
        let name = self.interner.get_existing(full)?;
        self.by_full_name.get(&name).copied()
    }

    /// Look up a type by simple name.
    ///
    /// Order: each imported namespace in turn, then the global
    /// namespace, then a unique simple-name match across everything
    /// referenced. An ambiguous simple name stays unresolved.
    pub fn type_by_simple_name(&self, simple: &str) -> Option<TypeId> {
        for ns in self.imports.iter() {
            if let Some(id) = self.type_by_full_name(&format!("{ns}.{simple}")) {
                return Some(id);
            }
        }

        if let Some(id) = self.type_by_full_name(simple) {
            return Some(id);
        }

        let mut found = None;
        for (idx, ty) in self.types.iter().enumerate() {
            if ty.name == simple {
                if found.is_some() {
                    return None; // ambiguous
                }
                found = Some(TypeId::new(idx as u32));
            }
        }
        found
    }

    /// Look up a session local by name.
    pub fn local(&self, name: &str) -> Option<&LocalVariable> {
        self.locals.iter().find(|l| l.name == name)
    }

    /// Whether any referenced type lives in (or under) this namespace path.
    pub fn namespace_exists(&self, path: &str) -> bool {
        self.types.iter().any(|ty| {
            ty.namespace == path
                || (ty.namespace.len() > path.len()
                    && ty.namespace.starts_with(path)
                    && ty.namespace.as_bytes()[path.len()] == b'.')
        })
    }

    pub fn type_def(&self, id: TypeId) -> &TypeDef {
        self.types[id.index() as usize]
    }

    /// The type and its transitive bases, in derivation order.
    /// Cycle-guarded; a broken base reference ends the chain.
    pub fn base_chain(&self, id: TypeId) -> Vec<TypeId> {
        let mut chain = vec![id];
        let mut seen: FxHashSet<TypeId> = FxHashSet::default();
        seen.insert(id);

        let mut current = id;
        while let Some(base_name) = &self.type_def(current).base {
            let Some(base) = self.type_by_full_name(base_name) else {
                break;
            };
            if !seen.insert(base) {
                break;
            }
            chain.push(base);
            current = base;
        }

        chain
    }

    /// Find a member by name and staticness, walking the base chain.
    /// Derived declarations shadow base ones.
    pub fn find_member(&self, id: TypeId, name: &str, want_static: bool) -> Option<&MemberDef> {
        for ty_id in self.base_chain(id) {
            let found = self
                .type_def(ty_id)
                .members
                .iter()
                .find(|m| m.name == name && m.is_static == want_static);
            if found.is_some() {
                return found;
            }
        }
        None
    }

    /// All symbols visible on a value of this type: instance members
    /// along the base chain, plus reducible extension methods.
    ///
    /// Overrides are NOT collapsed here: a derived `ToString` and the
    /// inherited one both appear, and the completion layer groups them
    /// under one name.
    pub fn instance_symbols(&self, id: TypeId) -> Vec<SymbolInfo> {
        let mut symbols = Vec::new();
        for ty_id in self.base_chain(id) {
            let ty = self.type_def(ty_id);
            let container = ty.full_name();
            for member in ty.members.iter().filter(|m| !m.is_static) {
                symbols.push(symbol_from_member(member, &container));
            }
        }
        symbols.extend(self.extension_symbols(id));
        symbols
    }

    /// All symbols visible on the type itself (static access).
    pub fn static_symbols(&self, id: TypeId) -> Vec<SymbolInfo> {
        let mut symbols = Vec::new();
        for ty_id in self.base_chain(id) {
            let ty = self.type_def(ty_id);
            let container = ty.full_name();
            for member in ty.members.iter().filter(|m| m.is_static) {
                symbols.push(symbol_from_member(member, &container));
            }
        }
        symbols
    }

    /// Find a reducible extension method by name.
    pub fn find_extension(&self, id: TypeId, name: &str) -> Option<&ExtensionMethodDef> {
        let receivers: Vec<SmolStr> = self
            .base_chain(id)
            .into_iter()
            .map(|t| self.type_def(t).full_name())
            .collect();

        self.references
            .catalogs()
            .iter()
            .flat_map(|c| c.extensions())
            .find(|ext| {
                ext.name == name
                    && self.imports.contains(&ext.namespace)
                    && receivers.iter().any(|r| *r == ext.receiver)
            })
    }

    /// Extension methods reducible onto this type: the receiver must be
    /// the type or one of its bases, and the declaring namespace must be
    /// imported.
    pub fn extension_symbols(&self, id: TypeId) -> Vec<SymbolInfo> {
        let receivers: Vec<SmolStr> = self
            .base_chain(id)
            .into_iter()
            .map(|t| self.type_def(t).full_name())
            .collect();

        let mut symbols = Vec::new();
        for catalog in self.references.catalogs() {
            for ext in catalog.extensions() {
                if !self.imports.contains(&ext.namespace) {
                    continue;
                }
                if receivers.iter().any(|r| *r == ext.receiver) {
                    symbols.push(SymbolInfo {
                        name: ext.name.clone(),
                        kind: SymbolKind::ExtensionMethod,
                        container: ext.receiver.clone(),
                        is_static: false,
                        signature: ext.signature.clone(),
                    });
                }
            }
        }
        symbols
    }
}

fn symbol_from_member(member: &MemberDef, container: &SmolStr) -> SymbolInfo {
    SymbolInfo {
        name: member.name.clone(),
        kind: member.kind,
        container: container.clone(),
        is_static: member.is_static,
        signature: member.signature.clone(),
    }
}
