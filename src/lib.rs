//! exprcore: member completion and validation for embedded expressions.
//!
//! Hosts that let users type small C#-style expressions (a condition
//! field, an assignment value) need editor services without a full
//! compiler in the loop. This crate resolves dot-triggered member
//! completions and validates whole expressions against a declared set
//! of references, imported namespaces, and session locals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │ ide      completion, sessions,      │
//! │          validation                 │
//! ├─────────────────────────────────────┤
//! │ sem      catalogs, scopes, binding, │
//! │          literal parsing            │
//! ├─────────────────────────────────────┤
//! │ syntax   lexer, tolerant parser,    │
//! │          expression trees           │
//! ├─────────────────────────────────────┤
//! │ base     offsets, snapshots,        │
//! │          interning                  │
//! └─────────────────────────────────────┘
//! ```
//!
//! Each layer depends only on the ones below it. Resolution is a pure
//! function: the same references, imports, snapshot, and trigger always
//! produce the same candidate list.
//!
//! # Example
//!
//! ```
//! use exprcore::base::ExpressionSnapshot;
//! use exprcore::ide::resolve;
//! use exprcore::sem::{AssemblyRegistry, ImportedNamespaces, ReferenceSet};
//!
//! let registry = AssemblyRegistry::with_core();
//! let references = ReferenceSet::resolve(&registry, ["System.Runtime"]);
//! let imports: ImportedNamespaces = ["System"].into_iter().collect();
//!
//! let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
//! let candidates = resolve(&references, &imports, &snapshot, '.');
//! assert!(candidates.iter().any(|c| c.label == "AddDays"));
//! ```

pub mod base;
pub mod ide;
pub mod sem;
pub mod syntax;

pub use base::{ExpressionSnapshot, SnapshotError, TextRange, TextSize};
pub use ide::{
    resolve, resolve_with_locals, CompletionCandidate, EditorSession, ResolvedSymbolGroup,
    ValidationReport, Validator, MEMBER_ACCESS_TRIGGER,
};
pub use sem::{
    AssemblyCatalog, AssemblyRegistry, ImportedNamespaces, LocalVariable, ReferenceSet, SymbolInfo,
    SymbolKind,
};
