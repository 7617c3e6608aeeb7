//! Whole-expression validation.
//!
//! Unlike completion, which looks only at the prefix before the caret,
//! validation compiles the entire buffer and reports what does not
//! parse or does not resolve. Runs are coalesced: a validator refuses
//! to start while a previous run is still in flight, and a cancelled
//! token makes it return early with no report.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::base::{LineCol, LineIndex, TextSize};
use crate::sem::{
    bind_expr, Binding, ImportedNamespaces, LocalVariable, ReferenceSet, SemanticScope, TypeId,
};
use crate::syntax::{lex, parse_synthetic_unit, Expr};

use super::completion::SyntheticUnit;

/// One problem found in the expression text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    /// Byte offset in the user's text.
    pub offset: TextSize,
    /// Line and column of `offset`.
    pub position: LineCol,
    pub message: String,
}

/// The outcome of one validation run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Coalescing validation gate.
///
/// At most one run executes at a time per validator; a call that
/// arrives while another is in flight returns `None` immediately and
/// the caller re-requests once the current run finishes.
#[derive(Debug, Default)]
pub struct Validator {
    in_flight: AtomicBool,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the full expression text.
    ///
    /// Returns `None` when the token is already cancelled or another
    /// run holds the gate.
    pub fn validate(
        &self,
        cancel: &CancellationToken,
        references: &ReferenceSet,
        imports: &ImportedNamespaces,
        locals: &[LocalVariable],
        text: &str,
    ) -> Option<ValidationReport> {
        if cancel.is_cancelled() {
            return None;
        }
        if self.in_flight.swap(true, Ordering::Acquire) {
            debug!("validation already in flight, coalescing");
            return None;
        }

        let report = run_validation(cancel, references, imports, locals, text);
        self.in_flight.store(false, Ordering::Release);
        report
    }
}

fn run_validation(
    cancel: &CancellationToken,
    references: &ReferenceSet,
    imports: &ImportedNamespaces,
    locals: &[LocalVariable],
    text: &str,
) -> Option<ValidationReport> {
    let unit = SyntheticUnit::build(imports, text);
    let parsed = parse_synthetic_unit(&lex(&unit.text));
    if cancel.is_cancelled() {
        return None;
    }

    let scope = SemanticScope::new(references, imports, locals);
    let mut raw: Vec<(TextSize, String)> = Vec::new();
    for expr in &parsed.body {
        check_expr(&scope, expr, &mut raw);
    }
    if cancel.is_cancelled() {
        return None;
    }

    let index = LineIndex::new(text);
    let mut errors: Vec<ValidationError> = raw
        .into_iter()
        .filter_map(|(offset, message)| {
            // Errors inside the scaffold itself are not the user's
            let offset = unit.to_user(offset)?;
            Some(ValidationError {
                offset,
                position: index.line_col(offset),
                message,
            })
        })
        .collect();
    errors.sort_by_key(|e| e.offset);

    debug!(errors = errors.len(), "validation finished");
    Some(ValidationReport { errors })
}

/// Walk an expression, reporting nodes that fail to parse or resolve.
fn check_expr(scope: &SemanticScope<'_>, expr: &Expr, out: &mut Vec<(TextSize, String)>) {
    match expr {
        Expr::Error { range } => {
            out.push((range.start(), "unexpected token".to_string()));
        }

        Expr::Ident { name, range } => {
            if bind_expr(scope, expr) == Binding::Unknown {
                out.push((range.start(), format!("unknown name `{name}`")));
            }
        }

        Expr::Member {
            base, name, dot, ..
        } => {
            check_expr(scope, base, out);
            let Some(member) = name else {
                out.push((dot.start(), "expected a member name after `.`".to_string()));
                return;
            };
            match bind_expr(scope, base) {
                Binding::Value(id) => {
                    if scope.find_member(id, member, false).is_none()
                        && scope.find_extension(id, member).is_none()
                    {
                        out.push((dot.start(), unknown_member(scope, id, member)));
                    }
                }
                Binding::StaticType(id) => {
                    if scope.find_member(id, member, true).is_none() {
                        out.push((dot.start(), unknown_member(scope, id, member)));
                    }
                }
                // A namespace segment or an already-reported base
                Binding::Namespace(_) | Binding::Unknown => {}
            }
        }

        Expr::Call { callee, args, .. } => {
            check_expr(scope, callee, out);
            for arg in args {
                check_expr(scope, arg, out);
            }
        }

        Expr::New { ty, args, .. } => {
            check_expr(scope, ty, out);
            for arg in args {
                check_expr(scope, arg, out);
            }
        }

        Expr::Paren { inner, .. } => check_expr(scope, inner, out),

        Expr::Binary { lhs, rhs, .. } => {
            check_expr(scope, lhs, out);
            check_expr(scope, rhs, out);
        }

        Expr::Index { base, .. } => check_expr(scope, base, out),

        Expr::Literal { .. } => {}
    }
}

fn unknown_member(scope: &SemanticScope<'_>, id: TypeId, member: &str) -> String {
    format!(
        "`{}` has no member `{member}`",
        scope.type_def(id).full_name()
    )
}
