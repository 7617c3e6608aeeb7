//! Assembly catalogs, the registry, and best-effort reference sets.

use indexmap::IndexMap;
use smol_str::SmolStr;
use std::sync::Arc;
use tracing::debug;

use super::corelib::{core_catalog, CORE_ASSEMBLY_NAMES};
use super::model::{ExtensionMethodDef, MemberDef, SymbolKind, TypeDef};

/// A named bundle of type definitions and extension methods.
///
/// Catalogs play the role of loaded reference assemblies: they are built
/// once, shared via `Arc`, and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct AssemblyCatalog {
    name: SmolStr,
    types: Vec<TypeDef>,
    extensions: Vec<ExtensionMethodDef>,
}

impl AssemblyCatalog {
    /// Start building a catalog with the given assembly name.
    pub fn builder(name: impl Into<SmolStr>) -> AssemblyCatalogBuilder {
        AssemblyCatalogBuilder {
            name: name.into(),
            types: Vec::new(),
            extensions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn types(&self) -> &[TypeDef] {
        &self.types
    }

    pub fn extensions(&self) -> &[ExtensionMethodDef] {
        &self.extensions
    }
}

/// Builder for [`AssemblyCatalog`].
pub struct AssemblyCatalogBuilder {
    name: SmolStr,
    types: Vec<TypeDef>,
    extensions: Vec<ExtensionMethodDef>,
}

impl AssemblyCatalogBuilder {
    /// Declare a type. Members are added through the [`TypeBuilder`]
    /// passed to the closure.
    pub fn ty(
        mut self,
        namespace: &str,
        name: &str,
        base: Option<&str>,
        build: impl FnOnce(&mut TypeBuilder),
    ) -> Self {
        let mut tb = TypeBuilder {
            members: Vec::new(),
        };
        build(&mut tb);
        self.types.push(TypeDef {
            namespace: SmolStr::new(namespace),
            name: SmolStr::new(name),
            base: base.map(SmolStr::new),
            members: tb.members,
        });
        self
    }

    /// Declare an extension method reducible onto `receiver`.
    pub fn extension(
        mut self,
        namespace: &str,
        name: &str,
        receiver: &str,
        result: Option<&str>,
        signature: &str,
    ) -> Self {
        self.extensions.push(ExtensionMethodDef {
            namespace: SmolStr::new(namespace),
            name: SmolStr::new(name),
            receiver: SmolStr::new(receiver),
            result: result.map(SmolStr::new),
            signature: SmolStr::new(signature),
        });
        self
    }

    pub fn build(self) -> AssemblyCatalog {
        AssemblyCatalog {
            name: self.name,
            types: self.types,
            extensions: self.extensions,
        }
    }
}

/// Accumulates members for one type declaration.
pub struct TypeBuilder {
    members: Vec<MemberDef>,
}

impl TypeBuilder {
    pub fn method(&mut self, name: &str, result: Option<&str>, signature: &str) -> &mut Self {
        self.push(name, SymbolKind::Method, false, result, signature)
    }

    pub fn static_method(
        &mut self,
        name: &str,
        result: Option<&str>,
        signature: &str,
    ) -> &mut Self {
        self.push(name, SymbolKind::Method, true, result, signature)
    }

    pub fn property(&mut self, name: &str, result: &str) -> &mut Self {
        self.push(name, SymbolKind::Property, false, Some(result), name)
    }

    pub fn static_property(&mut self, name: &str, result: &str) -> &mut Self {
        self.push(name, SymbolKind::Property, true, Some(result), name)
    }

    pub fn field(&mut self, name: &str, result: &str) -> &mut Self {
        self.push(name, SymbolKind::Field, false, Some(result), name)
    }

    pub fn static_field(&mut self, name: &str, result: &str) -> &mut Self {
        self.push(name, SymbolKind::Field, true, Some(result), name)
    }

    fn push(
        &mut self,
        name: &str,
        kind: SymbolKind,
        is_static: bool,
        result: Option<&str>,
        signature: &str,
    ) -> &mut Self {
        self.members.push(MemberDef {
            name: SmolStr::new(name),
            kind,
            is_static,
            result: result.map(SmolStr::new),
            signature: SmolStr::new(signature),
        });
        self
    }
}

/// Maps loadable-assembly names to catalogs.
///
/// Insertion-ordered so that duplicate type definitions resolve
/// deterministically (first registration wins in the merged scope).
#[derive(Clone, Debug, Default)]
pub struct AssemblyRegistry {
    catalogs: IndexMap<SmolStr, Arc<AssemblyCatalog>>,
}

impl AssemblyRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in core library registered under its
    /// conventional assembly names.
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        let core = core_catalog();
        for name in CORE_ASSEMBLY_NAMES {
            registry.register(*name, Arc::clone(&core));
        }
        registry
    }

    /// Register a catalog under a name. Re-registering a name replaces
    /// the previous catalog.
    pub fn register(&mut self, name: impl Into<SmolStr>, catalog: Arc<AssemblyCatalog>) {
        self.catalogs.insert(name.into(), catalog);
    }

    /// Look up a catalog by assembly name.
    pub fn get(&self, name: &str) -> Option<&Arc<AssemblyCatalog>> {
        self.catalogs.get(name)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

/// An ordered collection of resolved references, owned by one editor
/// session.
///
/// Construction is best effort: an assembly name that does not resolve
/// in the registry is dropped, so the set may be a strict subset of the
/// requested names. Immutable once constructed; when the hosting context
/// changes, a fresh set is built rather than mutating this one.
#[derive(Clone, Debug, Default)]
pub struct ReferenceSet {
    catalogs: Vec<Arc<AssemblyCatalog>>,
}

impl ReferenceSet {
    /// Resolve a list of assembly names against a registry.
    pub fn resolve<I, S>(registry: &AssemblyRegistry, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalogs: Vec<Arc<AssemblyCatalog>> = Vec::new();

        for name in names {
            let name = name.as_ref();
            match registry.get(name) {
                Some(catalog) => {
                    // Aliases of one catalog collapse to a single entry
                    if !catalogs.iter().any(|c| Arc::ptr_eq(c, catalog)) {
                        catalogs.push(Arc::clone(catalog));
                    }
                }
                None => {
                    debug!(assembly = name, "reference did not resolve, dropping");
                }
            }
        }

        Self { catalogs }
    }

    /// The resolved catalogs, in request order.
    pub fn catalogs(&self) -> &[Arc<AssemblyCatalog>] {
        &self.catalogs
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_shapes() {
        let catalog = AssemblyCatalog::builder("Test.Assembly")
            .ty("Acme", "Widget", Some("System.Object"), |t| {
                t.property("Size", "System.Int32")
                    .method("Resize", None, "Resize(int size)");
            })
            .extension(
                "Acme.Extensions",
                "Squash",
                "Acme.Widget",
                None,
                "Squash()",
            )
            .build();

        assert_eq!(catalog.name(), "Test.Assembly");
        assert_eq!(catalog.types().len(), 1);
        assert_eq!(catalog.types()[0].members.len(), 2);
        assert_eq!(catalog.extensions().len(), 1);
    }

    #[test]
    fn test_reference_set_drops_unknown_names() {
        let registry = AssemblyRegistry::with_core();
        let refs = ReferenceSet::resolve(&registry, ["System.Runtime", "No.Such.Assembly"]);
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_reference_set_collapses_aliases() {
        let registry = AssemblyRegistry::with_core();
        // Both names point at the same core catalog
        let refs = ReferenceSet::resolve(&registry, ["System.Runtime", "mscorlib"]);
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_reference_set_empty_request() {
        let registry = AssemblyRegistry::with_core();
        let refs = ReferenceSet::resolve(&registry, Vec::<String>::new());
        assert!(refs.is_empty());
    }
}
