//! End-to-end member completion scenarios.
//!
//! Each test drives the public resolver the way an editor host would:
//! references, imports, a text snapshot with the caret after a typed
//! dot, and the trigger character.

use std::sync::Arc;

use once_cell::sync::Lazy;
use rstest::rstest;

use exprcore::base::ExpressionSnapshot;
use exprcore::ide::{resolve, resolve_with_locals, CompletionCandidate};
use exprcore::sem::{
    AssemblyCatalog, AssemblyRegistry, ImportedNamespaces, LocalVariable, ReferenceSet, SymbolKind,
};
use exprcore::TextSize;

static REGISTRY: Lazy<AssemblyRegistry> = Lazy::new(AssemblyRegistry::with_core);

fn core_references() -> ReferenceSet {
    ReferenceSet::resolve(&REGISTRY, ["System.Runtime"])
}

fn system_imports() -> ImportedNamespaces {
    ["System"].into_iter().collect()
}

fn complete(text: &str) -> Vec<CompletionCandidate> {
    let snapshot = ExpressionSnapshot::at_end(text);
    resolve(&core_references(), &system_imports(), &snapshot, '.')
}

fn labels(candidates: &[CompletionCandidate]) -> Vec<String> {
    candidates.iter().map(|c| c.label.to_string()).collect()
}

#[test]
fn test_static_property_chain_lists_instance_members() {
    let names = labels(&complete("DateTime.Now."));

    for expected in ["Year", "Month", "Day", "AddDays"] {
        assert!(
            names.iter().any(|n| n == expected),
            "DateTime.Now. should offer {expected}"
        );
        assert_eq!(
            names.iter().filter(|n| *n == expected).count(),
            1,
            "{expected} should appear exactly once"
        );
    }
    // Statics stay off instance completion
    assert!(!names.iter().any(|n| n == "Now"));
}

#[test]
fn test_integer_literal_completes_as_int32() {
    let names = labels(&complete("42."));
    assert!(names.iter().any(|n| n == "CompareTo"));
    assert!(names.iter().any(|n| n == "ToString"));
    assert!(!names.iter().any(|n| n == "Parse"));
}

#[test]
fn test_string_literal_completes_as_string() {
    let names = labels(&complete("\"abc\"."));
    assert!(names.iter().any(|n| n == "Length"));
    assert!(names.iter().any(|n| n == "Substring"));
}

#[test]
fn test_type_name_lists_static_members() {
    let names = labels(&complete("DateTime."));
    assert!(names.iter().any(|n| n == "Now"));
    assert!(names.iter().any(|n| n == "Parse"));
    assert!(!names.iter().any(|n| n == "AddDays"));
}

#[test]
fn test_call_result_carries_the_return_type() {
    let names = labels(&complete("DateTime.Now.AddDays(1)."));
    assert!(names.iter().any(|n| n == "Year"));
}

#[test]
fn test_simple_name_resolves_without_imports() {
    // No `using System;` in scope, but DateTime is unambiguous
    let snapshot = ExpressionSnapshot::at_end("DateTime.");
    let imports = ImportedNamespaces::new();
    let candidates = resolve(&core_references(), &imports, &snapshot, '.');
    assert!(labels(&candidates).iter().any(|n| n == "Now"));
}

#[test]
fn test_instance_chain_resolves_without_imports() {
    // The whole chain works with an empty namespace list: DateTime
    // resolves by unique simple name, Now carries the instance type
    let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
    let imports = ImportedNamespaces::new();
    let candidates = resolve(&core_references(), &imports, &snapshot, '.');
    let names = labels(&candidates);
    assert!(names.iter().any(|n| n == "Year"));
    assert!(names.iter().any(|n| n == "AddDays"));
    assert!(!names.iter().any(|n| n == "Now"));
}

#[rstest]
#[case("foo.")]
#[case("foo.bar.")]
#[case("DateTime.Now.AddDays.")] // method group has no type
#[case("(DateTime.Now).")] // parenthesized base is unsupported
#[case("System.")] // namespace, not a type
fn test_unresolvable_bases_yield_empty(#[case] text: &str) {
    assert!(complete(text).is_empty(), "{text} should yield nothing");
}

#[test]
fn test_non_dot_trigger_yields_empty() {
    let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
    let candidates = resolve(&core_references(), &system_imports(), &snapshot, 'w');
    assert!(candidates.is_empty());
}

#[test]
fn test_empty_text_yields_empty() {
    assert!(complete("").is_empty());
}

#[rstest]
#[case("{{{.")]
#[case("}}.")]
#[case("var var var.")]
#[case("@#$.")]
fn test_malformed_input_degrades_to_empty(#[case] text: &str) {
    // Never panics, never errors; just no candidates
    assert!(complete(text).is_empty());
}

#[test]
fn test_candidates_ordered_by_ordinal_name() {
    let names = labels(&complete("DateTime.Now."));
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
}

#[test]
fn test_to_string_group_folds_overrides_and_overloads() {
    let candidates = complete("DateTime.Now.");
    let group = candidates
        .iter()
        .find(|c| c.label == "ToString")
        .expect("a ToString group")
        .group
        .symbols
        .clone();

    // DateTime declares its own ToString and inherits Object's; both
    // land in the same group under one label
    assert!(group.len() >= 2);
    assert!(group.iter().any(|s| s.container == "System.DateTime"));
    assert!(group.iter().any(|s| s.container == "System.Object"));
}

#[test]
fn test_resolution_is_stateless_and_repeatable() {
    let first = labels(&complete("DateTime.Now."));
    let second = labels(&complete("DateTime.Now."));
    assert_eq!(first, second);
}

#[test]
fn test_local_variable_completes_through_declared_type() {
    let locals = vec![LocalVariable::new("dueDate", "System.DateTime")];
    let snapshot = ExpressionSnapshot::at_end("dueDate.");
    let candidates = resolve_with_locals(
        &core_references(),
        &system_imports(),
        &locals,
        &snapshot,
        '.',
    );
    assert!(labels(&candidates).iter().any(|n| n == "AddDays"));
}

#[test]
fn test_caret_before_end_ignores_the_tail() {
    // Caret after the first dot; the rest of the buffer is stale text
    let snapshot = ExpressionSnapshot::new("DateTime.Nxx", TextSize::from(9)).unwrap();
    let candidates = resolve(&core_references(), &system_imports(), &snapshot, '.');
    assert!(labels(&candidates).iter().any(|n| n == "Now"));
}

fn acme_registry() -> AssemblyRegistry {
    let mut registry = AssemblyRegistry::with_core();
    let catalog = AssemblyCatalog::builder("Acme.Orders")
        .ty("Acme", "Order", Some("System.Object"), |t| {
            t.property("Total", "System.Double")
                .property("PlacedAt", "System.DateTime")
                .method("Cancel", None, "Cancel()");
        })
        .extension(
            "Acme.Text",
            "Truncate",
            "System.String",
            Some("System.String"),
            "Truncate(int length)",
        )
        .build();
    registry.register("Acme.Orders", Arc::new(catalog));
    registry
}

#[test]
fn test_user_assembly_types_complete() {
    let registry = acme_registry();
    let refs = ReferenceSet::resolve(&registry, ["System.Runtime", "Acme.Orders"]);
    let imports: ImportedNamespaces = ["System", "Acme"].into_iter().collect();
    let locals = vec![LocalVariable::new("order", "Acme.Order")];

    let snapshot = ExpressionSnapshot::at_end("order.");
    let candidates = resolve_with_locals(&refs, &imports, &locals, &snapshot, '.');
    let names = labels(&candidates);

    assert!(names.iter().any(|n| n == "Total"));
    assert!(names.iter().any(|n| n == "Cancel"));
    // Inherited from Object through the declared base
    assert!(names.iter().any(|n| n == "GetHashCode"));
}

#[test]
fn test_extension_method_requires_its_namespace_import() {
    let registry = acme_registry();
    let refs = ReferenceSet::resolve(&registry, ["System.Runtime", "Acme.Orders"]);
    let snapshot = ExpressionSnapshot::at_end("\"abc\".");

    let without: ImportedNamespaces = ["System"].into_iter().collect();
    let names = labels(&resolve(&refs, &without, &snapshot, '.'));
    assert!(!names.iter().any(|n| n == "Truncate"));

    let with: ImportedNamespaces = ["System", "Acme.Text"].into_iter().collect();
    let candidates = resolve(&refs, &with, &snapshot, '.');
    let truncate = candidates
        .iter()
        .find(|c| c.label == "Truncate")
        .expect("extension method in the list");
    assert_eq!(truncate.group.symbols[0].kind, SymbolKind::ExtensionMethod);
}

#[test]
fn test_unresolved_references_are_dropped_not_fatal() {
    let refs = ReferenceSet::resolve(&REGISTRY, ["System.Runtime", "No.Such.Assembly"]);
    let snapshot = ExpressionSnapshot::at_end("DateTime.");
    let candidates = resolve(&refs, &system_imports(), &snapshot, '.');
    assert!(labels(&candidates).iter().any(|n| n == "Now"));
}
