//! Tagged-variant expression trees.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

/// Kind of a literal expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LitKind {
    Int,
    Real,
    Str,
    Char,
    Bool,
}

/// An expression node.
///
/// Every node records its source range in the synthetic unit. Member
/// accesses additionally record the range of the dot itself, which is
/// how the completion resolver finds the node that owns the trigger
/// character, and allow a missing member name so that text ending in a
/// dot still parses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    /// A bare identifier: a local, a type name, or a namespace head.
    Ident { name: SmolStr, range: TextRange },
    /// A literal value.
    Literal {
        kind: LitKind,
        text: SmolStr,
        range: TextRange,
    },
    /// Member access `base.name`, or a trailing `base.` while mid-edit.
    Member {
        base: Box<Expr>,
        name: Option<SmolStr>,
        dot: TextRange,
        range: TextRange,
    },
    /// A call `callee(args...)`.
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
        range: TextRange,
    },
    /// An indexing `base[...]`. The index expression is not kept; the
    /// binder treats indexing as an unsupported shape.
    Index { base: Box<Expr>, range: TextRange },
    /// Two operands joined by a binary operator. The operator is not
    /// kept; the binder treats binary shapes as unsupported.
    Binary {
        lhs: Box<Expr>,
        rhs: Box<Expr>,
        range: TextRange,
    },
    /// A parenthesized expression.
    Paren { inner: Box<Expr>, range: TextRange },
    /// An object creation `new Type(args...)`.
    New {
        ty: Box<Expr>,
        args: Vec<Expr>,
        range: TextRange,
    },
    /// A token that could not start an expression. Recovery node.
    Error { range: TextRange },
}

impl Expr {
    /// The source range of this node.
    pub fn range(&self) -> TextRange {
        match self {
            Expr::Ident { range, .. }
            | Expr::Literal { range, .. }
            | Expr::Member { range, .. }
            | Expr::Call { range, .. }
            | Expr::Index { range, .. }
            | Expr::Binary { range, .. }
            | Expr::Paren { range, .. }
            | Expr::New { range, .. }
            | Expr::Error { range } => *range,
        }
    }
}

/// A parsed synthetic compilation unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceUnit {
    /// Namespace paths from the `using` directives, in order.
    pub directives: Vec<SmolStr>,
    /// The expressions parsed out of the method body, in order.
    pub body: Vec<Expr>,
}

/// Find the member-access node whose dot token contains `offset`.
///
/// Dot ranges are disjoint, so at most one node matches.
pub fn member_access_at(expr: &Expr, offset: TextSize) -> Option<&Expr> {
    match expr {
        Expr::Member { base, dot, .. } => {
            if dot.start() <= offset && offset < dot.end() {
                return Some(expr);
            }
            member_access_at(base, offset)
        }
        Expr::Call { callee, args, .. } => member_access_at(callee, offset)
            .or_else(|| args.iter().find_map(|a| member_access_at(a, offset))),
        Expr::New { ty, args, .. } => member_access_at(ty, offset)
            .or_else(|| args.iter().find_map(|a| member_access_at(a, offset))),
        Expr::Index { base, .. } => member_access_at(base, offset),
        Expr::Binary { lhs, rhs, .. } => {
            member_access_at(lhs, offset).or_else(|| member_access_at(rhs, offset))
        }
        Expr::Paren { inner, .. } => member_access_at(inner, offset),
        Expr::Ident { .. } | Expr::Literal { .. } | Expr::Error { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{lex, parse_synthetic_unit};

    fn parse_expr(text: &str) -> Expr {
        let tokens = lex(text);
        let unit = parse_synthetic_unit(&tokens);
        unit.body.into_iter().next().expect("one expression")
    }

    #[test]
    fn test_member_access_at_trailing_dot() {
        let expr = parse_expr("date.");
        let member = member_access_at(&expr, TextSize::from(4)).expect("member node");
        match member {
            Expr::Member { base, name, .. } => {
                assert!(name.is_none());
                assert!(matches!(&**base, Expr::Ident { name, .. } if name == "date"));
            }
            other => panic!("expected member access, got {other:?}"),
        }
    }

    #[test]
    fn test_member_access_at_inner_dot() {
        let expr = parse_expr("DateTime.Now.");
        // First dot: base is the bare identifier
        let first = member_access_at(&expr, TextSize::from(8)).expect("first dot");
        match first {
            Expr::Member { base, name, .. } => {
                assert_eq!(name.as_deref(), Some("Now"));
                assert!(matches!(&**base, Expr::Ident { name, .. } if name == "DateTime"));
            }
            other => panic!("expected member access, got {other:?}"),
        }
        // Second dot: base is the whole chain
        let second = member_access_at(&expr, TextSize::from(12)).expect("second dot");
        match second {
            Expr::Member { base, name, .. } => {
                assert!(name.is_none());
                assert!(matches!(&**base, Expr::Member { .. }));
            }
            other => panic!("expected member access, got {other:?}"),
        }
    }

    #[test]
    fn test_member_access_at_misses_non_dot() {
        let expr = parse_expr("abc.def");
        assert!(member_access_at(&expr, TextSize::from(1)).is_none());
    }
}
