//! Statement and block parsing.
//!
//! Blocks are indentation-delimited: a compound statement's body is either a
//! single inline statement on the header line, or every following line whose
//! indent is strictly greater than the header line's own indent (the block
//! base indent). The block ends at the first line at or below the base.

use crate::parser::{ParseResult, Parser};
use rover_lexer::token::TokenKind;
use rover_types::ast::{Expr, Stmt};

impl Parser {
    /// Parse a single statement, dispatching on its first token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        match self.peek_kind() {
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Pass => {
                self.advance();
                Ok(Stmt::Pass)
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Expression statement, promoted to an assignment when followed by `=`.
    fn parse_expression_statement(&mut self) -> ParseResult<Stmt> {
        let expr = self.parse_expression()?;

        if self.eat(&TokenKind::Eq) {
            let name = match expr {
                Expr::Variable(name) => name,
                _ => {
                    return Err(
                        self.error_here("left side of assignment must be a variable")
                    );
                }
            };
            let value = self.parse_expression()?;
            return Ok(Stmt::Assign { name, value });
        }

        Ok(Stmt::Expression(expr))
    }

    // ─────────────────────────────────────────────────────────────
    // Compound statements
    // ─────────────────────────────────────────────────────────────

    /// `if cond:` body, zero or more `elif cond:` branches, optional `else:`.
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let base = self.line_indent;
        self.advance(); // eat `if`
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "after if condition")?;
        let then_body = self.parse_block(base)?;

        let mut elif_branches = Vec::new();
        loop {
            self.eat_newline_before_chain(base);
            if !self.chain_continues_at(base, &TokenKind::Elif) {
                break;
            }
            self.advance(); // indent
            self.advance(); // eat `elif`
            let cond = self.parse_expression()?;
            self.expect(&TokenKind::Colon, "after elif condition")?;
            let body = self.parse_block(base)?;
            elif_branches.push((cond, body));
        }

        self.eat_newline_before_chain(base);
        let else_body = if self.chain_continues_at(base, &TokenKind::Else) {
            self.advance(); // indent
            self.advance(); // eat `else`
            self.expect(&TokenKind::Colon, "after else")?;
            Some(self.parse_block(base)?)
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_body,
            elif_branches,
            else_body,
        })
    }

    /// `for <identifier> in range(<1-3 expressions>):` — the only iterable
    /// form. Argument values are resolved at run time; only the arity is
    /// fixed here.
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let base = self.line_indent;
        self.advance(); // eat `for`
        let variable = self.expect_identifier("after 'for'")?;
        self.expect(&TokenKind::In, "after for variable")?;
        self.expect(&TokenKind::Range, "as the for loop iterable")?;
        self.expect(&TokenKind::LParen, "after 'range'")?;

        let mut range_args = vec![self.parse_expression()?];
        while self.eat(&TokenKind::Comma) {
            if range_args.len() == 3 {
                return Err(self.error_here("range() takes 1-3 arguments"));
            }
            range_args.push(self.parse_expression()?);
        }
        self.expect(&TokenKind::RParen, "after range arguments")?;
        self.expect(&TokenKind::Colon, "after for loop header")?;

        let body = self.parse_block(base)?;
        Ok(Stmt::For {
            variable,
            range_args,
            body,
        })
    }

    /// `while cond:` body.
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let base = self.line_indent;
        self.advance(); // eat `while`
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "after while condition")?;
        let body = self.parse_block(base)?;
        Ok(Stmt::While { condition, body })
    }

    // ─────────────────────────────────────────────────────────────
    // Blocks
    // ─────────────────────────────────────────────────────────────

    /// Parse a compound statement's body. `base` is the indent width of the
    /// header line.
    pub(crate) fn parse_block(&mut self, base: u32) -> ParseResult<Vec<Stmt>> {
        // single inline statement on the header line: `if x: pass`
        if !self.check(&TokenKind::Newline) {
            return Ok(vec![self.parse_statement()?]);
        }
        self.advance(); // eat the header's newline

        let mut stmts = Vec::new();
        while let TokenKind::Indent(width) = *self.peek_kind() {
            if width <= base {
                break;
            }
            self.advance(); // eat the body line's indent
            match self.parse_statement() {
                Ok(stmt) => {
                    stmts.push(stmt);
                    self.end_of_line();
                }
                Err(err) => {
                    self.errors.push(err);
                    self.synchronize();
                }
            }
        }
        Ok(stmts)
    }

    /// An `elif`/`else` continues the chain only when its line sits at the
    /// same indent as the `if` header.
    fn chain_continues_at(&self, base: u32, keyword: &TokenKind) -> bool {
        matches!(self.peek_kind(), TokenKind::Indent(w) if *w == base)
            && self.look_ahead(1) == keyword
    }

    /// After an inline then-body (`if x: pass`) the header line's newline is
    /// still pending; consume it when an `elif`/`else` line follows so the
    /// chain attaches.
    fn eat_newline_before_chain(&mut self, base: u32) {
        if self.check(&TokenKind::Newline)
            && matches!(self.look_ahead(1), TokenKind::Indent(w) if *w == base)
            && matches!(self.look_ahead(2), TokenKind::Elif | TokenKind::Else)
        {
            self.advance();
        }
    }
}
