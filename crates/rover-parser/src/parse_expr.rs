//! Expression parsing.
//!
//! Precedence (loosest → tightest binding):
//! 1. `or`
//! 2. `and`
//! 3. prefix `not`
//! 4. `>`, `>=`, `<`, `<=`
//! 5. `+`, `-`
//! 6. `*`, `//`, `%`
//! 7. prefix `-`, `not`
//! 8. `==`, `!=`
//! 9. primary (literal, variable, parens, call, dotted access)
//!
//! This chain is deliberately non-standard — equality binds tighter than
//! unary minus, and comparison sits looser than the arithmetic tiers.
//! It must be reproduced verbatim for behavioral compatibility.

use crate::parser::{ParseResult, Parser};
use rover_lexer::token::TokenKind;
use rover_types::ast::{BinOp, Expr, UnaryOp};

impl Parser {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    // ─────────────────────────────────────────────────────────────
    // Precedence chain
    // ─────────────────────────────────────────────────────────────

    /// `OrExpr = AndExpr { "or" AndExpr }`
    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = binary(left, BinOp::Or, right);
        }
        Ok(left)
    }

    /// `AndExpr = NotExpr { "and" NotExpr }`
    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_not()?;
            left = binary(left, BinOp::And, right);
        }
        Ok(left)
    }

    /// `NotExpr = "not" NotExpr | CompExpr`
    fn parse_not(&mut self) -> ParseResult<Expr> {
        if self.eat(&TokenKind::Not) {
            let operand = self.parse_not()?;
            return Ok(Expr::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    /// `CompExpr = AddExpr { (">" | ">=" | "<" | "<=") AddExpr }`
    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Greater => BinOp::Gt,
                TokenKind::GreaterEq => BinOp::Ge,
                TokenKind::Less => BinOp::Lt,
                TokenKind::LessEq => BinOp::Le,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `MulExpr = UnaryExpr { ("*" | "//" | "%") UnaryExpr }`
    fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::FloorDiv => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    /// `UnaryExpr = ("-" | "not") UnaryExpr | EqExpr`
    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek_kind() {
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Not => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_equality()
    }

    /// `EqExpr = PostfixExpr { ("==" | "!=") PostfixExpr }`
    ///
    /// Equality operands are primary-level on purpose: `-x == 5` parses as
    /// `-(x == 5)`.
    fn parse_equality(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_postfix()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::NotEq,
                _ => break,
            };
            self.advance();
            let right = self.parse_postfix()?;
            left = binary(left, op, right);
        }
        Ok(left)
    }

    // ─────────────────────────────────────────────────────────────
    // Postfix & primary
    // ─────────────────────────────────────────────────────────────

    /// `PostfixExpr = PrimaryExpr { "." Identifier [ "(" ArgList ")" ] }`
    fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_primary()?;
        while self.eat(&TokenKind::Dot) {
            let name = self.expect_identifier("after '.'")?;
            if self.eat(&TokenKind::LParen) {
                let args = self.parse_arg_list()?;
                self.expect(&TokenKind::RParen, "after arguments")?;
                expr = Expr::MethodCall {
                    object: Box::new(expr),
                    method: name,
                    args,
                };
            } else {
                expr = Expr::Attribute {
                    object: Box::new(expr),
                    name,
                };
            }
        }
        Ok(expr)
    }

    /// Literal, variable, parenthesized expression, or bare call.
    fn parse_primary(&mut self) -> ParseResult<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Expr::Number(value))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(Expr::Str(value))
            }
            TokenKind::Ident(name) => {
                self.advance();
                if self.eat(&TokenKind::LParen) {
                    let args = self.parse_arg_list()?;
                    self.expect(&TokenKind::RParen, "after arguments")?;
                    return Ok(Expr::Call { name, args });
                }
                Ok(Expr::Variable(name))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            other => Err(self.error_here(format!("unexpected token '{other}'"))),
        }
    }

    /// Comma-separated argument expressions; the caller consumes the parens.
    fn parse_arg_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }
        args.push(self.parse_expression()?);
        while self.eat(&TokenKind::Comma) {
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}
