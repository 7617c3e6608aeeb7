//! Error-tolerant recursive descent parser.
//!
//! Parses a synthetic compilation unit: `using` directives, the fixed
//! namespace/class/method/`var x =` scaffold, then whatever expression
//! text the user has typed so far. The input is mid-edit by definition,
//! so the parser recovers from anything: missing scaffold pieces are
//! skipped over, junk tokens become error nodes, and a tree is always
//! produced.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

use super::ast::{Expr, LitKind, SourceUnit};
use super::lexer::{Token, TokenKind};

/// Parse a tokenized synthetic unit. Never fails.
pub fn parse_synthetic_unit(tokens: &[Token]) -> SourceUnit {
    let mut parser = Parser { tokens, pos: 0 };
    parser.unit()
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn unit(&mut self) -> SourceUnit {
        let directives = self.directives();
        self.scaffold();

        let mut body = Vec::new();
        while let Some(token) = self.peek() {
            if token.kind.starts_expr() {
                body.push(self.expr());
            } else {
                // Junk between expressions: semicolons, stray braces,
                // operators with no left operand. Skip one and continue.
                self.bump();
            }
        }

        SourceUnit { directives, body }
    }

    /// `using A.B.C;` lines. Anything that breaks the shape ends the
    /// directive early; the namespace path collected so far is kept.
    fn directives(&mut self) -> Vec<SmolStr> {
        let mut directives = Vec::new();

        while self.at(TokenKind::UsingKw) {
            self.bump();
            let mut path = String::new();
            loop {
                match self.peek_kind() {
                    Some(TokenKind::Ident) => {
                        path.push_str(&self.bump_token().text);
                    }
                    Some(TokenKind::Dot) => {
                        self.bump();
                        path.push('.');
                    }
                    Some(TokenKind::Semi) => {
                        self.bump();
                        break;
                    }
                    _ => break,
                }
            }
            if !path.is_empty() {
                directives.push(SmolStr::new(path));
            }
        }

        directives
    }

    /// The fixed `namespace X { class Y { void Z() { var v =` shell.
    /// Each piece is optional so a damaged scaffold cannot derail the
    /// expression that follows.
    fn scaffold(&mut self) {
        self.eat(TokenKind::NamespaceKw);
        self.eat(TokenKind::Ident);
        self.eat(TokenKind::LBrace);
        self.eat(TokenKind::ClassKw);
        self.eat(TokenKind::Ident);
        self.eat(TokenKind::LBrace);
        self.eat(TokenKind::VoidKw);
        self.eat(TokenKind::Ident);
        self.eat(TokenKind::LParen);
        self.eat(TokenKind::RParen);
        self.eat(TokenKind::LBrace);
        self.eat(TokenKind::VarKw);
        self.eat(TokenKind::Ident);
        self.eat(TokenKind::Assign);
    }

    fn expr(&mut self) -> Expr {
        let mut lhs = self.postfix();

        while self.peek_kind().is_some_and(|k| k.is_binary_op()) {
            self.bump();
            // A trailing operator with nothing after it keeps the lhs
            let Some(token) = self.peek() else { break };
            if !token.kind.starts_expr() {
                break;
            }
            let rhs = self.postfix();
            let range = TextRange::new(lhs.range().start(), rhs.range().end());
            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                range,
            };
        }

        lhs
    }

    fn postfix(&mut self) -> Expr {
        let mut expr = self.primary();

        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    let dot = self.bump_token().range;
                    let (name, end) = if self.at(TokenKind::Ident) {
                        let token = self.bump_token();
                        (Some(token.text.clone()), token.range.end())
                    } else {
                        (None, dot.end())
                    };
                    let range = TextRange::new(expr.range().start(), end);
                    expr = Expr::Member {
                        base: Box::new(expr),
                        name,
                        dot,
                        range,
                    };
                }
                Some(TokenKind::LParen) => {
                    self.bump();
                    let (args, end) = self.arguments(expr.range().end());
                    let range = TextRange::new(expr.range().start(), end);
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                        range,
                    };
                }
                Some(TokenKind::LBracket) => {
                    let end = self.skip_brackets();
                    let range = TextRange::new(expr.range().start(), end);
                    expr = Expr::Index {
                        base: Box::new(expr),
                        range,
                    };
                }
                _ => break,
            }
        }

        expr
    }

    fn primary(&mut self) -> Expr {
        let Some(token) = self.peek().cloned() else {
            // Callers only enter primary() with a token available; this
            // arm exists for the recovery paths.
            let end = self
                .tokens
                .last()
                .map(|t| t.range.end())
                .unwrap_or_else(|| TextSize::from(0));
            return Expr::Error {
                range: TextRange::empty(end),
            };
        };

        match token.kind {
            TokenKind::Ident => {
                self.bump();
                Expr::Ident {
                    name: token.text,
                    range: token.range,
                }
            }
            TokenKind::Int => self.literal(LitKind::Int),
            TokenKind::Real => self.literal(LitKind::Real),
            TokenKind::Str => self.literal(LitKind::Str),
            TokenKind::CharLit => self.literal(LitKind::Char),
            TokenKind::TrueKw | TokenKind::FalseKw => self.literal(LitKind::Bool),
            TokenKind::LParen => {
                self.bump();
                let inner = if self.peek_kind().is_some_and(|k| k.starts_expr()) {
                    self.expr()
                } else {
                    Expr::Error {
                        range: TextRange::empty(token.range.end()),
                    }
                };
                let end = if self.at(TokenKind::RParen) {
                    self.bump_token().range.end()
                } else {
                    inner.range().end()
                };
                Expr::Paren {
                    inner: Box::new(inner),
                    range: TextRange::new(token.range.start(), end),
                }
            }
            TokenKind::NewKw => {
                self.bump();
                let ty = self.type_path(token.range);
                let (args, end) = if self.at(TokenKind::LParen) {
                    self.bump();
                    self.arguments(ty.range().end())
                } else {
                    (Vec::new(), ty.range().end())
                };
                Expr::New {
                    ty: Box::new(ty),
                    args,
                    range: TextRange::new(token.range.start(), end),
                }
            }
            _ => {
                self.bump();
                Expr::Error { range: token.range }
            }
        }
    }

    /// A dotted type path after `new`, e.g. `System.DateTime`.
    fn type_path(&mut self, fallback: TextRange) -> Expr {
        if !self.at(TokenKind::Ident) {
            return Expr::Error {
                range: TextRange::empty(fallback.end()),
            };
        }
        let head = self.bump_token();
        let mut expr = Expr::Ident {
            name: head.text,
            range: head.range,
        };
        while self.at(TokenKind::Dot) {
            let dot = self.bump_token().range;
            let (name, end) = if self.at(TokenKind::Ident) {
                let token = self.bump_token();
                (Some(token.text.clone()), token.range.end())
            } else {
                (None, dot.end())
            };
            let range = TextRange::new(expr.range().start(), end);
            expr = Expr::Member {
                base: Box::new(expr),
                name,
                dot,
                range,
            };
        }
        expr
    }

    /// Call arguments after the opening paren has been consumed.
    /// Returns the arguments and the end offset of the call.
    fn arguments(&mut self, open_end: TextSize) -> (Vec<Expr>, TextSize) {
        let mut args = Vec::new();
        let mut end = open_end;

        loop {
            match self.peek_kind() {
                None => break,
                Some(TokenKind::RParen) => {
                    end = self.bump_token().range.end();
                    break;
                }
                Some(TokenKind::Comma) => {
                    end = self.bump_token().range.end();
                }
                Some(k) if k.starts_expr() => {
                    let arg = self.expr();
                    end = arg.range().end();
                    args.push(arg);
                }
                Some(_) => {
                    // Junk inside an argument list
                    end = self.bump_token().range.end();
                }
            }
        }

        (args, end)
    }

    /// Skip a bracketed section, tolerating a missing closing bracket.
    fn skip_brackets(&mut self) -> TextSize {
        let mut end = self.bump_token().range.end(); // the '['
        let mut depth = 1usize;
        while depth > 0 {
            let Some(token) = self.peek() else { break };
            match token.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth -= 1,
                _ => {}
            }
            end = self.bump_token().range.end();
        }
        end
    }

    fn literal(&mut self, kind: LitKind) -> Expr {
        let token = self.bump_token();
        Expr::Literal {
            kind,
            text: token.text,
            range: token.range,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn bump_token(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }
}
