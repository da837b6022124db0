//! Core parser infrastructure: token cursor, diagnostics, synchronization.

use rover_lexer::token::{Token, TokenKind};
use rover_types::SyntaxError;

/// Internal result type for statement/expression productions. A failed
/// production unwinds to the nearest statement loop, which records the
/// diagnostic and synchronizes.
pub(crate) type ParseResult<T> = Result<T, SyntaxError>;

/// The RoverScript parser.
///
/// Consumes a token stream produced by the lexer and builds a statement
/// list. Parsing never fails overall: a malformed statement is dropped,
/// recorded as a [`SyntaxError`], and parsing resumes at the next
/// statement boundary.
pub struct Parser {
    /// The token stream (always ends with `Eof`).
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Indent width of the line currently being parsed — the width carried
    /// by the most recently consumed `Indent` token. Compound statements
    /// capture it as their block base indent.
    pub(crate) line_indent: u32,
    /// Collected diagnostics.
    pub(crate) errors: Vec<SyntaxError>,
}

/// Result of parsing: the recovered statements plus any diagnostics.
#[derive(Debug)]
pub struct ParseOutcome {
    /// Successfully parsed statements, in source order.
    pub statements: Vec<rover_types::ast::Stmt>,
    /// Diagnostics for the statements that were dropped.
    pub errors: Vec<SyntaxError>,
}

impl Parser {
    /// Create a new parser from a token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            line_indent: 0,
            errors: Vec::new(),
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should end with Eof")
        })
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Advance the cursor by one and return the consumed token.
    /// Consuming an `Indent` records its width as the current line indent.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if let TokenKind::Indent(width) = token.kind {
            self.line_indent = width;
        }
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the kind of the previously consumed token.
    pub(crate) fn previous_kind(&self) -> Option<&TokenKind> {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|t| &t.kind)
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Line number of the current token.
    pub(crate) fn current_line(&self) -> u32 {
        self.peek().line
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a specific token kind, or fail the current production.
    pub(crate) fn expect(&mut self, expected: &TokenKind, context: &str) -> ParseResult<Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!(
                "expected '{expected}' {context}, got '{}'",
                self.peek_kind()
            )))
        }
    }

    /// Expect an identifier token and return its name.
    pub(crate) fn expect_identifier(&mut self, context: &str) -> ParseResult<String> {
        match self.peek_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(self.error_here(format!(
                "expected identifier {context}, got '{other}'"
            ))),
        }
    }

    /// Build a diagnostic at the current token.
    pub(crate) fn error_here(&self, message: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.current_line(), message)
    }

    // ── Synchronization ───────────────────────────────────────────────────────

    /// Skip tokens until just past the next `Newline` or to the next keyword
    /// that can start (or continue) a statement. Always advances at least
    /// one token so recovery makes progress.
    pub(crate) fn synchronize(&mut self) {
        self.advance();
        while !self.at_end() {
            if matches!(self.previous_kind(), Some(TokenKind::Newline)) {
                return;
            }
            match self.peek_kind() {
                TokenKind::If
                | TokenKind::For
                | TokenKind::While
                | TokenKind::Elif
                | TokenKind::Else => return,
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Consume the delimiter after a successful statement: a `Newline`, the
    /// start of the next line, or end of input. Trailing junk on the line is
    /// recorded and skipped; the statement itself is kept.
    pub(crate) fn end_of_line(&mut self) {
        if self.eat(&TokenKind::Newline) || self.at_end() {
            return;
        }
        if matches!(self.peek_kind(), TokenKind::Indent(_)) {
            // a compound statement's block already consumed its newlines
            return;
        }
        let err = self.error_here(format!(
            "expected newline after statement, got '{}'",
            self.peek_kind()
        ));
        self.errors.push(err);
        self.synchronize();
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a statement list.
    ///
    /// Never fails: malformed statements contribute nothing to the output
    /// and are reported in [`ParseOutcome::errors`].
    pub fn parse(mut self) -> ParseOutcome {
        let mut statements = Vec::new();

        while !self.at_end() {
            // each tokenized line opens with its indent marker
            if matches!(self.peek_kind(), TokenKind::Indent(_)) {
                self.advance();
            }
            if self.at_end() {
                break;
            }
            match self.parse_statement() {
                Ok(stmt) => {
                    statements.push(stmt);
                    self.end_of_line();
                }
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }

        ParseOutcome {
            statements,
            errors: self.errors,
        }
    }
}
