//! Lossless tokenization of synthetic compilation units.

use logos::Logos;
use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

/// Token kinds for the embedded expression language.
///
/// The grammar covers C#-style expressions plus the handful of keywords
/// the synthetic scaffold needs (`using`, `namespace`, `class`, `void`,
/// `var`). Anything the lexer does not recognize becomes [`TokenKind::Unknown`];
/// lexing never fails.
#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[token("using")]
    UsingKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("class")]
    ClassKw,
    #[token("void")]
    VoidKw,
    #[token("var")]
    VarKw,
    #[token("new")]
    NewKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,

    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*")]
    Ident,

    // A real literal requires a digit after the decimal point, so a
    // trailing dot ("42.") lexes as an integer followed by a dot token.
    // That dot is the member-access trigger the resolver looks for.
    #[regex(r"[0-9][0-9_]*\.[0-9]+([eE][+-]?[0-9]+)?")]
    Real,
    #[regex(r"[0-9][0-9_]*")]
    Int,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    Str,
    #[regex(r"'([^'\\\n]|\\.)'")]
    CharLit,

    #[token(".")]
    Dot,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,
    #[token("?")]
    Question,
    #[token(":")]
    Colon,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("=")]
    Assign,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    /// Any byte sequence the lexer cannot classify.
    Unknown,
}

impl TokenKind {
    /// Whether this token can begin an expression.
    pub fn starts_expr(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Real
                | TokenKind::Str
                | TokenKind::CharLit
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::LParen
                | TokenKind::NewKw
        )
    }

    /// Whether this token is a binary operator the parser consumes.
    pub fn is_binary_op(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
                | TokenKind::AndAnd
                | TokenKind::OrOr
        )
    }
}

/// A token with its source range and text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    pub text: SmolStr,
}

/// Tokenize the given text.
///
/// Unrecognized input degrades to [`TokenKind::Unknown`] tokens; the
/// result always covers every non-whitespace byte of the input.
pub fn lex(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(text);

    while let Some(result) = lexer.next() {
        let kind = result.unwrap_or(TokenKind::Unknown);
        let span = lexer.span();
        tokens.push(Token {
            kind,
            range: TextRange::new(
                TextSize::from(span.start as u32),
                TextSize::from(span.end as u32),
            ),
            text: SmolStr::new(lexer.slice()),
        });
    }

    tokens
}

/// Find the token whose range contains `offset`.
pub fn token_at(tokens: &[Token], offset: TextSize) -> Option<&Token> {
    tokens
        .iter()
        .find(|t| t.range.start() <= offset && offset < t.range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_member_chain() {
        assert_eq!(
            kinds("DateTime.Now."),
            vec![
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::Dot
            ]
        );
    }

    #[test]
    fn test_lex_int_then_dot() {
        // "42." is not a real literal; the dot must stay its own token
        assert_eq!(kinds("42."), vec![TokenKind::Int, TokenKind::Dot]);
        assert_eq!(kinds("42.5"), vec![TokenKind::Real]);
    }

    #[test]
    fn test_lex_string_swallows_dot() {
        assert_eq!(kinds(r#""a.b""#), vec![TokenKind::Str]);
    }

    #[test]
    fn test_lex_unknown_bytes() {
        let tokens = lex("a # b");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Ident, TokenKind::Unknown, TokenKind::Ident]
        );
    }

    #[test]
    fn test_lex_scaffold_keywords() {
        assert_eq!(
            kinds("namespace Scratch { class Host { void Eval() { var value ="),
            vec![
                TokenKind::NamespaceKw,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::ClassKw,
                TokenKind::Ident,
                TokenKind::LBrace,
                TokenKind::VoidKw,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::VarKw,
                TokenKind::Ident,
                TokenKind::Assign,
            ]
        );
    }

    #[test]
    fn test_token_at() {
        let tokens = lex("ab.cd");
        assert_eq!(
            token_at(&tokens, TextSize::from(2)).map(|t| t.kind),
            Some(TokenKind::Dot)
        );
        assert_eq!(
            token_at(&tokens, TextSize::from(4)).map(|t| t.kind),
            Some(TokenKind::Ident)
        );
        assert_eq!(token_at(&tokens, TextSize::from(5)), None);
    }
}
