//! Expression binding: resolving an AST node to a type.

use smol_str::SmolStr;
use tracing::trace;

use crate::syntax::{Expr, LitKind};

use super::model::{SymbolKind, TypeId};
use super::scope::SemanticScope;

/// What an expression resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Binding {
    /// A value of the given type; member access sees instance members.
    Value(TypeId),
    /// A type name; member access sees static members.
    StaticType(TypeId),
    /// A namespace prefix, e.g. `System` in `System.DateTime`.
    Namespace(SmolStr),
    /// Unresolvable, or a shape binding does not support.
    Unknown,
}

/// Resolve the type of an expression within a scope.
///
/// Supported shapes are bare identifiers, literals, member chains,
/// calls, and object creation. Parenthesized, binary, indexing and
/// error shapes bind to [`Binding::Unknown`] — a deliberate narrowing,
/// not an error.
pub fn bind_expr(scope: &SemanticScope<'_>, expr: &Expr) -> Binding {
    match expr {
        Expr::Literal { kind, .. } => match scope.type_by_full_name(literal_type_name(*kind)) {
            Some(id) => Binding::Value(id),
            None => Binding::Unknown,
        },

        Expr::Ident { name, .. } => bind_ident(scope, name),

        Expr::Member {
            base,
            name: Some(member),
            ..
        } => match bind_expr(scope, base) {
            Binding::Namespace(ns) => {
                let candidate = format!("{ns}.{member}");
                if let Some(id) = scope.type_by_full_name(&candidate) {
                    Binding::StaticType(id)
                } else if scope.namespace_exists(&candidate) {
                    Binding::Namespace(SmolStr::new(candidate))
                } else {
                    Binding::Unknown
                }
            }
            Binding::StaticType(id) => member_binding(scope, id, member, true),
            Binding::Value(id) => member_binding(scope, id, member, false),
            Binding::Unknown => Binding::Unknown,
        },

        // A trailing dot has no member to bind; it only serves as the
        // completion anchor.
        Expr::Member { name: None, .. } => Binding::Unknown,

        Expr::Call { callee, .. } => call_binding(scope, callee),

        Expr::New { ty, .. } => match bind_expr(scope, ty) {
            Binding::StaticType(id) => Binding::Value(id),
            _ => Binding::Unknown,
        },

        Expr::Paren { .. }
        | Expr::Binary { .. }
        | Expr::Index { .. }
        | Expr::Error { .. } => Binding::Unknown,
    }
}

fn bind_ident(scope: &SemanticScope<'_>, name: &str) -> Binding {
    if let Some(local) = scope.local(name) {
        let resolved = scope
            .type_by_full_name(&local.type_name)
            .or_else(|| scope.type_by_simple_name(&local.type_name));
        return match resolved {
            Some(id) => Binding::Value(id),
            None => {
                trace!(local = name, ty = %local.type_name, "local has unknown type");
                Binding::Unknown
            }
        };
    }

    if let Some(id) = scope.type_by_simple_name(name) {
        return Binding::StaticType(id);
    }

    if scope.namespace_exists(name) {
        return Binding::Namespace(SmolStr::new(name));
    }

    Binding::Unknown
}

/// Bind `receiver.member` where the receiver already resolved to a type.
///
/// Properties and fields yield a value of their result type. A method
/// name without a call is a method group, which has no type of its own.
fn member_binding(
    scope: &SemanticScope<'_>,
    id: TypeId,
    member: &str,
    want_static: bool,
) -> Binding {
    match scope.find_member(id, member, want_static) {
        Some(m) if m.kind != SymbolKind::Method => match &m.result {
            Some(result) => value_of(scope, result),
            None => Binding::Unknown,
        },
        _ => Binding::Unknown,
    }
}

/// Bind a call through its callee: `x.M(...)` takes M's return type.
fn call_binding(scope: &SemanticScope<'_>, callee: &Expr) -> Binding {
    let Expr::Member {
        base,
        name: Some(method),
        ..
    } = callee
    else {
        return Binding::Unknown;
    };

    match bind_expr(scope, base) {
        Binding::StaticType(id) => method_result(scope, id, method, true),
        Binding::Value(id) => {
            let direct = method_result(scope, id, method, false);
            if direct != Binding::Unknown {
                return direct;
            }
            // Fall back to a reducible extension method
            match scope.find_extension(id, method) {
                Some(ext) => match &ext.result {
                    Some(result) => value_of(scope, result),
                    None => Binding::Unknown,
                },
                None => Binding::Unknown,
            }
        }
        _ => Binding::Unknown,
    }
}

fn method_result(
    scope: &SemanticScope<'_>,
    id: TypeId,
    method: &str,
    want_static: bool,
) -> Binding {
    match scope.find_member(id, method, want_static) {
        Some(m) if m.kind == SymbolKind::Method => match &m.result {
            Some(result) => value_of(scope, result),
            None => Binding::Unknown,
        },
        _ => Binding::Unknown,
    }
}

fn value_of(scope: &SemanticScope<'_>, full_name: &str) -> Binding {
    match scope.type_by_full_name(full_name) {
        Some(id) => Binding::Value(id),
        None => Binding::Unknown,
    }
}

/// The concrete type a literal resolves to.
fn literal_type_name(kind: LitKind) -> &'static str {
    match kind {
        LitKind::Int => "System.Int32",
        LitKind::Real => "System.Double",
        LitKind::Str => "System.String",
        LitKind::Char => "System.Char",
        LitKind::Bool => "System.Boolean",
    }
}
