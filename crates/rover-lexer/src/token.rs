//! Token types for the RoverScript lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in the language and
//! [`Token`], which pairs a kind with its 1-based source line.

use std::fmt;

/// Keyword table: source text paired with the token it lexes to.
///
/// `in` is deliberately absent — it gets bespoke two-character handling in
/// the lexer, with the same alphanumeric lookahead as the table entries.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("for", TokenKind::For),
    ("while", TokenKind::While),
    ("pass", TokenKind::Pass),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("not", TokenKind::Not),
    ("range", TokenKind::Range),
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the RoverScript lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, line: u32) -> Self {
        Self { kind, line }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in RoverScript.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Keywords ─────────────────────────────────────────────
    /// `if`
    If,
    /// `elif`
    Elif,
    /// `else`
    Else,
    /// `for`
    For,
    /// `while`
    While,
    /// `pass`
    Pass,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `in`
    In,
    /// `range` (reserved: only valid as the iterable of a `for` loop)
    Range,

    // ── Literals ─────────────────────────────────────────────
    /// Integer literal: `42`. Unsigned at the lexical level; negative
    /// numbers come from the unary minus operator.
    Number(i64),
    /// String literal, `'` or `"` delimited, no escape processing.
    Str(String),

    // ── Identifiers ──────────────────────────────────────────
    /// User identifier: `steps`, `bot`, `move_forward`
    Ident(String),

    // ── Operators ────────────────────────────────────────────
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<=`
    LessEq,
    /// `>=`
    GreaterEq,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `//`
    FloorDiv,
    /// `%`
    Percent,
    /// `=`
    Eq,

    // ── Punctuation ──────────────────────────────────────────
    /// `:`
    Colon,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `.`
    Dot,

    // ── Structural ───────────────────────────────────────────
    /// Line-leading indentation marker; carries the raw count of leading
    /// whitespace characters (spaces and tabs each count as one unit).
    Indent(u32),
    /// Logical end of line — one per tokenized source line.
    Newline,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::If => f.write_str("if"),
            TokenKind::Elif => f.write_str("elif"),
            TokenKind::Else => f.write_str("else"),
            TokenKind::For => f.write_str("for"),
            TokenKind::While => f.write_str("while"),
            TokenKind::Pass => f.write_str("pass"),
            TokenKind::And => f.write_str("and"),
            TokenKind::Or => f.write_str("or"),
            TokenKind::Not => f.write_str("not"),
            TokenKind::In => f.write_str("in"),
            TokenKind::Range => f.write_str("range"),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::Ident(s) => f.write_str(s),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::FloorDiv => f.write_str("//"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::Eq => f.write_str("="),
            TokenKind::Colon => f.write_str(":"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Indent(_) => f.write_str("indent"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_excludes_in() {
        assert!(KEYWORDS.iter().all(|(text, _)| *text != "in"));
        assert_eq!(KEYWORDS.len(), 10);
    }

    #[test]
    fn test_display_keywords_roundtrip() {
        for (text, kind) in KEYWORDS {
            assert_eq!(&kind.to_string(), text);
        }
        assert_eq!(TokenKind::In.to_string(), "in");
    }

    #[test]
    fn test_display_operators() {
        assert_eq!(TokenKind::EqEq.to_string(), "==");
        assert_eq!(TokenKind::BangEq.to_string(), "!=");
        assert_eq!(TokenKind::FloorDiv.to_string(), "//");
        assert_eq!(TokenKind::Eq.to_string(), "=");
    }

    #[test]
    fn test_display_literals() {
        assert_eq!(TokenKind::Number(42).to_string(), "42");
        assert_eq!(TokenKind::Str("hi".into()).to_string(), "\"hi\"");
        assert_eq!(TokenKind::Ident("bot".into()).to_string(), "bot");
    }

    #[test]
    fn test_token_construction() {
        let token = Token::new(TokenKind::While, 4);
        assert_eq!(token.kind, TokenKind::While);
        assert_eq!(token.line, 4);
    }
}
