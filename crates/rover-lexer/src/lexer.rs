//! Core RoverScript lexer — converts source text to a token stream.
//!
//! The lexer is line-oriented and infallible:
//! - Blank lines and `#` comment lines contribute no tokens at all.
//! - Every other line emits exactly one [`TokenKind::Indent`] (raw leading
//!   whitespace count), its content tokens, then one [`TokenKind::Newline`].
//! - Unrecognized characters are silently skipped; malformed fragments
//!   surface as parse or runtime errors downstream, never lexical ones.
//! - The stream always ends with [`TokenKind::Eof`].

use crate::token::{Token, TokenKind, KEYWORDS};

/// The RoverScript lexer.
pub struct Lexer<'src> {
    source: &'src str,
}

/// Tokenize a complete script. Convenience for `Lexer::new(source).lex()`.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).lex()
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self { source }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut last_line = 0u32;

        for (idx, raw) in self.source.lines().enumerate() {
            let line_no = idx as u32 + 1;
            last_line = line_no;

            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            // Raw count of leading whitespace characters; tabs and spaces
            // each count as one unit and are never normalized.
            let indent = raw.chars().take_while(|c| c.is_whitespace()).count() as u32;
            tokens.push(Token::new(TokenKind::Indent(indent), line_no));
            lex_line(trimmed, line_no, &mut tokens);
            tokens.push(Token::new(TokenKind::Newline, line_no));
        }

        tokens.push(Token::new(TokenKind::Eof, last_line.max(1)));
        tokens
    }
}

// ─────────────────────────────────────────────────────────────
// Line scanning
// ─────────────────────────────────────────────────────────────

/// Tokenize the trimmed content of one line.
fn lex_line(line: &str, line_no: u32, out: &mut Vec<Token>) {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let ch = bytes[i];

        if ch == b' ' || ch == b'\t' {
            i += 1;
            continue;
        }

        // Keywords, guarded by a negative alphanumeric lookahead so that
        // `iffy` lexes as an identifier rather than `if` + `fy`.
        if let Some((kind, len)) = match_keyword(bytes, i) {
            out.push(Token::new(kind, line_no));
            i += len;
            continue;
        }

        // `in` is not in the keyword table; match it explicitly with the
        // same lookahead so `index` still lexes as an identifier.
        if bytes[i..].starts_with(b"in") && !is_ident_byte(bytes.get(i + 2).copied()) {
            out.push(Token::new(TokenKind::In, line_no));
            i += 2;
            continue;
        }

        // Identifiers: [A-Za-z_][A-Za-z0-9_]*
        if ch.is_ascii_alphabetic() || ch == b'_' {
            let end = scan_while(bytes, i, |b| b.is_ascii_alphanumeric() || b == b'_');
            let text = std::str::from_utf8(&bytes[i..end]).unwrap_or("");
            out.push(Token::new(TokenKind::Ident(text.to_string()), line_no));
            i = end;
            continue;
        }

        // Numbers: unsigned digit runs; unary minus handles negatives later.
        if ch.is_ascii_digit() {
            let end = scan_while(bytes, i, |b| b.is_ascii_digit());
            let text = std::str::from_utf8(&bytes[i..end]).unwrap_or("0");
            // runs too long for i64 saturate rather than fail
            let value: i64 = text.parse().unwrap_or(i64::MAX);
            out.push(Token::new(TokenKind::Number(value), line_no));
            i = end;
            continue;
        }

        // Strings: scan to the matching quote, no escape processing.
        // An unterminated literal silently consumes the rest of the line.
        if ch == b'"' || ch == b'\'' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != ch {
                j += 1;
            }
            let text = std::str::from_utf8(&bytes[i + 1..j]).unwrap_or("");
            out.push(Token::new(TokenKind::Str(text.to_string()), line_no));
            i = if j < bytes.len() { j + 1 } else { j };
            continue;
        }

        // Two-character operators before their single-character prefixes.
        // A lone `/` is not a token — only `//` is — so it falls through
        // to the skip arm like any other unrecognized character.
        let next = bytes.get(i + 1).copied();
        let (kind, len) = match (ch, next) {
            (b'=', Some(b'=')) => (TokenKind::EqEq, 2),
            (b'!', Some(b'=')) => (TokenKind::BangEq, 2),
            (b'<', Some(b'=')) => (TokenKind::LessEq, 2),
            (b'>', Some(b'=')) => (TokenKind::GreaterEq, 2),
            (b'/', Some(b'/')) => (TokenKind::FloorDiv, 2),
            (b'<', _) => (TokenKind::Less, 1),
            (b'>', _) => (TokenKind::Greater, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            (b'=', _) => (TokenKind::Eq, 1),
            (b':', _) => (TokenKind::Colon, 1),
            (b'(', _) => (TokenKind::LParen, 1),
            (b')', _) => (TokenKind::RParen, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            _ => {
                i += 1;
                continue;
            }
        };
        out.push(Token::new(kind, line_no));
        i += len;
    }
}

/// Try to match a keyword from the table at byte offset `at`.
/// Returns the token kind and matched length.
fn match_keyword(bytes: &[u8], at: usize) -> Option<(TokenKind, usize)> {
    for (text, kind) in KEYWORDS {
        let len = text.len();
        if bytes[at..].starts_with(text.as_bytes())
            && !is_ident_byte(bytes.get(at + len).copied())
        {
            return Some((kind.clone(), len));
        }
    }
    None
}

fn is_ident_byte(b: Option<u8>) -> bool {
    matches!(b, Some(c) if c.is_ascii_alphanumeric() || c == b'_')
}

fn scan_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut i = start;
    while i < bytes.len() && pred(bytes[i]) {
        i += 1;
    }
    i
}

// ─────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────
