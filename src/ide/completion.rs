//! Dot-triggered member completion.
//!
//! The resolver compiles the text up to the caret inside a declaration
//! scaffold, locates the member-access node that owns the trigger dot,
//! binds its base to a type, and enumerates the members visible on that
//! type. Symbols are grouped by name and the groups are returned in
//! ascending ordinal order. Any failure along the way yields an empty
//! list, never an error: completion must not interrupt typing.

use std::collections::BTreeMap;

use smol_str::SmolStr;
use tracing::{debug, trace};

use crate::base::{ExpressionSnapshot, TextSize};
use crate::sem::{
    bind_expr, Binding, ImportedNamespaces, LocalVariable, ReferenceSet, SemanticScope, SymbolInfo,
};
use crate::syntax::{lex, member_access_at, parse_synthetic_unit, token_at, Expr, TokenKind};

/// The only character that triggers member completion.
pub const MEMBER_ACCESS_TRIGGER: char = '.';

/// Declaration scaffold wrapped around the expression prefix so that a
/// bare fragment parses as a compilation unit.
const SCAFFOLD: &str = "namespace Scratch { class Host { void Eval() { var value = ";

/// A synthetic compilation unit: `using` directives, then the scaffold,
/// then the user's text up to the caret.
#[derive(Clone, Debug)]
pub struct SyntheticUnit {
    pub text: String,
    /// Offset inside `text` where the user's prefix begins.
    pub user_offset: TextSize,
}

impl SyntheticUnit {
    pub fn build(imports: &ImportedNamespaces, prefix: &str) -> Self {
        let mut text = imports.render_directives();
        text.push_str(SCAFFOLD);
        let user_offset = TextSize::from(text.len() as u32);
        text.push_str(prefix);
        Self { text, user_offset }
    }

    /// Map an offset in the user's text to the synthetic unit.
    pub fn to_synthetic(&self, user: TextSize) -> TextSize {
        self.user_offset + user
    }

    /// Map a synthetic offset back into the user's text, if it lands
    /// inside the user's prefix at all.
    pub fn to_user(&self, synthetic: TextSize) -> Option<TextSize> {
        if synthetic >= self.user_offset {
            Some(synthetic - self.user_offset)
        } else {
            None
        }
    }
}

/// All symbols sharing one member name: overloads, an override plus the
/// declarations it shadows, or an extension form alongside them.
#[derive(Clone, Debug)]
pub struct ResolvedSymbolGroup {
    pub name: SmolStr,
    pub symbols: Vec<SymbolInfo>,
}

/// One entry in the completion list.
#[derive(Clone, Debug)]
pub struct CompletionCandidate {
    pub label: SmolStr,
    pub group: ResolvedSymbolGroup,
}

/// Resolve member completions for a snapshot, with no session locals.
pub fn resolve(
    references: &ReferenceSet,
    imports: &ImportedNamespaces,
    snapshot: &ExpressionSnapshot,
    trigger: char,
) -> Vec<CompletionCandidate> {
    resolve_with_locals(references, imports, &[], snapshot, trigger)
}

/// Resolve member completions for a snapshot.
///
/// Returns an empty list when the trigger is not a dot, when there is
/// no text before the caret, or when the dot's base does not bind to a
/// type. One name appears at most once in the result.
pub fn resolve_with_locals(
    references: &ReferenceSet,
    imports: &ImportedNamespaces,
    locals: &[LocalVariable],
    snapshot: &ExpressionSnapshot,
    trigger: char,
) -> Vec<CompletionCandidate> {
    if trigger != MEMBER_ACCESS_TRIGGER {
        return Vec::new();
    }
    if snapshot.is_prefix_empty() {
        return Vec::new();
    }

    let candidates = try_resolve(references, imports, locals, snapshot).unwrap_or_default();
    debug!(count = candidates.len(), "member completion resolved");
    candidates
}

fn try_resolve(
    references: &ReferenceSet,
    imports: &ImportedNamespaces,
    locals: &[LocalVariable],
    snapshot: &ExpressionSnapshot,
) -> Option<Vec<CompletionCandidate>> {
    let unit = SyntheticUnit::build(imports, snapshot.prefix());
    let tokens = lex(&unit.text);

    // The caret sits just past the typed dot.
    let dot_pos = unit.to_synthetic(snapshot.caret()) - TextSize::from(1);
    let token = token_at(&tokens, dot_pos)?;
    if token.kind != TokenKind::Dot {
        trace!(kind = ?token.kind, "trigger position is not a dot token");
        return None;
    }

    let parsed = parse_synthetic_unit(&tokens);
    let access = parsed
        .body
        .iter()
        .find_map(|e| member_access_at(e, dot_pos))?;
    let Expr::Member { base, .. } = access else {
        return None;
    };

    let scope = SemanticScope::new(references, imports, locals);
    let symbols = match bind_expr(&scope, base) {
        Binding::Value(id) => scope.instance_symbols(id),
        Binding::StaticType(id) => scope.static_symbols(id),
        Binding::Namespace(_) | Binding::Unknown => {
            trace!("dot base did not bind to a type");
            return None;
        }
    };
    if symbols.is_empty() {
        return None;
    }

    Some(group_by_name(symbols))
}

/// Group symbols under their shared name. `BTreeMap` keys iterate in
/// ascending ordinal order, which is exactly the list order we want.
fn group_by_name(symbols: Vec<SymbolInfo>) -> Vec<CompletionCandidate> {
    let mut groups: BTreeMap<SmolStr, Vec<SymbolInfo>> = BTreeMap::new();
    for symbol in symbols {
        groups.entry(symbol.name.clone()).or_default().push(symbol);
    }

    groups
        .into_iter()
        .map(|(name, symbols)| CompletionCandidate {
            label: name.clone(),
            group: ResolvedSymbolGroup { name, symbols },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sem::{AssemblyRegistry, SymbolKind};

    fn core_setup() -> (ReferenceSet, ImportedNamespaces) {
        let registry = AssemblyRegistry::with_core();
        let refs = ReferenceSet::resolve(&registry, ["System.Runtime"]);
        let imports: ImportedNamespaces = ["System"].into_iter().collect();
        (refs, imports)
    }

    fn labels(candidates: &[CompletionCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_synthetic_unit_offsets() {
        let imports: ImportedNamespaces = ["System"].into_iter().collect();
        let unit = SyntheticUnit::build(&imports, "DateTime.");
        assert!(unit.text.starts_with("using System;\n"));
        assert!(unit.text.ends_with("DateTime."));
        assert_eq!(
            unit.to_user(unit.to_synthetic(TextSize::from(3))),
            Some(TextSize::from(3))
        );
        assert_eq!(unit.to_user(TextSize::from(0)), None);
    }

    #[test]
    fn test_static_member_completion() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("DateTime.");
        let candidates = resolve(&refs, &imports, &snapshot, '.');

        let names = labels(&candidates);
        assert!(names.contains(&"Now"));
        assert!(names.contains(&"Parse"));
        // Instance members do not appear on the type itself
        assert!(!names.contains(&"AddDays"));
    }

    #[test]
    fn test_instance_member_completion() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
        let candidates = resolve(&refs, &imports, &snapshot, '.');

        let names = labels(&candidates);
        assert!(names.contains(&"Year"));
        assert!(names.contains(&"AddDays"));
        assert!(!names.contains(&"Now"));
    }

    #[test]
    fn test_candidates_are_sorted_and_deduplicated() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
        let candidates = resolve(&refs, &imports, &snapshot, '.');

        let names = labels(&candidates);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_overloads_share_one_group() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
        let candidates = resolve(&refs, &imports, &snapshot, '.');

        let to_string = candidates
            .iter()
            .find(|c| c.label == "ToString")
            .expect("ToString group");
        assert!(to_string.group.symbols.len() >= 2);
        assert!(to_string
            .group
            .symbols
            .iter()
            .all(|s| s.kind == SymbolKind::Method));
    }

    #[test]
    fn test_non_dot_trigger_is_empty() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("DateTime.Now.");
        assert!(resolve(&refs, &imports, &snapshot, 'x').is_empty());
    }

    #[test]
    fn test_empty_prefix_is_empty() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("");
        assert!(resolve(&refs, &imports, &snapshot, '.').is_empty());
    }

    #[test]
    fn test_unknown_base_is_empty() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("foo.");
        assert!(resolve(&refs, &imports, &snapshot, '.').is_empty());
    }

    #[test]
    fn test_caret_mid_text_uses_prefix_only() {
        let (refs, imports) = core_setup();
        // Caret right after the first dot; the tail is ignored
        let snapshot =
            ExpressionSnapshot::new("DateTime.Now.AddDays(1)", TextSize::from(9)).unwrap();
        let candidates = resolve(&refs, &imports, &snapshot, '.');
        assert!(labels(&candidates).contains(&"Now"));
    }

    #[test]
    fn test_locals_resolve_through_declared_type() {
        let (refs, imports) = core_setup();
        let locals = vec![LocalVariable::new("order", "System.DateTime")];
        let snapshot = ExpressionSnapshot::at_end("order.");
        let candidates = resolve_with_locals(&refs, &imports, &locals, &snapshot, '.');
        assert!(labels(&candidates).contains(&"AddDays"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (refs, imports) = core_setup();
        let snapshot = ExpressionSnapshot::at_end("\"abc\".");
        let first = resolve(&refs, &imports, &snapshot, '.');
        let second = resolve(&refs, &imports, &snapshot, '.');
        assert_eq!(labels(&first), labels(&second));
        assert!(labels(&first).contains(&"Length"));
    }
}
