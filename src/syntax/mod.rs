//! Lexer, expression AST, and error-tolerant parser.
//!
//! The text handed to this layer is by definition mid-edit: a synthetic
//! compilation unit whose tail is whatever the user has typed so far.
//! Lexing and parsing therefore never fail; malformed input degrades to
//! error tokens and error nodes, and a best-effort tree always comes out.

mod ast;
mod lexer;
mod parser;

pub use ast::{member_access_at, Expr, LitKind, SourceUnit};
pub use lexer::{lex, token_at, Token, TokenKind};
pub use parser::parse_synthetic_unit;
