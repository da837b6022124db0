//! Parser integration tests.
//!
//! Covers: statement dispatch, assignment promotion, indentation-delimited
//! blocks, the elif/else chain, for/range arity, the deliberately
//! non-standard precedence chain, and statement-level error recovery.

use rover_lexer::tokenize;
use rover_parser::{ParseOutcome, Parser};
use rover_types::ast::{BinOp, Expr, Stmt, UnaryOp};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse(source: &str) -> ParseOutcome {
    Parser::new(tokenize(source)).parse()
}

/// Parse and require zero diagnostics.
fn parse_clean(source: &str) -> Vec<Stmt> {
    let outcome = parse(source);
    assert!(
        outcome.errors.is_empty(),
        "unexpected diagnostics: {:?}",
        outcome.errors
    );
    outcome.statements
}

/// Parse a single expression statement and return its expression.
fn parse_expr(source: &str) -> Expr {
    let mut stmts = parse_clean(source);
    assert_eq!(stmts.len(), 1, "expected one statement");
    match stmts.remove(0) {
        Stmt::Expression(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn var(name: &str) -> Expr {
    Expr::Variable(name.into())
}

fn bin(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        op,
        right: Box::new(right),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Simple statements
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_assignment() {
    let stmts = parse_clean("x = 5");
    assert_eq!(
        stmts,
        vec![Stmt::Assign {
            name: "x".into(),
            value: Expr::Number(5),
        }]
    );
}

#[test]
fn test_assignment_to_non_variable_is_an_error() {
    let outcome = parse("1 = 2");
    assert!(outcome.statements.is_empty());
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0]
        .message
        .contains("left side of assignment must be a variable"));
}

#[test]
fn test_assignment_to_attribute_is_an_error() {
    let outcome = parse("bot.x = 2");
    assert!(outcome.statements.is_empty());
    assert!(!outcome.errors.is_empty());
}

#[test]
fn test_pass_statement() {
    assert_eq!(parse_clean("pass"), vec![Stmt::Pass]);
}

#[test]
fn test_method_call_statement() {
    let expr = parse_expr("bot.move_forward()");
    assert_eq!(
        expr,
        Expr::MethodCall {
            object: Box::new(var("bot")),
            method: "move_forward".into(),
            args: vec![],
        }
    );
}

#[test]
fn test_attribute_expression() {
    let expr = parse_expr("bot.x + 1");
    assert_eq!(
        expr,
        bin(
            Expr::Attribute {
                object: Box::new(var("bot")),
                name: "x".into(),
            },
            BinOp::Add,
            Expr::Number(1),
        )
    );
}

// ─────────────────────────────────────────────────────────────────────
// Blocks & the if chain
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_if_else_single_node() {
    let stmts = parse_clean(
        "if bot.can_move():\n    bot.move_forward()\nelse:\n    bot.turn_right()",
    );
    assert_eq!(stmts.len(), 1);
    match &stmts[0] {
        Stmt::If {
            then_body,
            elif_branches,
            else_body,
            ..
        } => {
            assert_eq!(then_body.len(), 1);
            assert!(elif_branches.is_empty());
            assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn test_elif_chain_in_source_order() {
    let stmts = parse_clean(
        "if x == 1:\n    pass\nelif x == 2:\n    pass\nelif x == 3:\n    pass\nelse:\n    pass",
    );
    match &stmts[0] {
        Stmt::If {
            elif_branches,
            else_body,
            ..
        } => {
            assert_eq!(elif_branches.len(), 2);
            assert!(else_body.is_some());
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn test_inline_body() {
    let stmts = parse_clean("if x: pass\nelse: bot.turn_left()");
    match &stmts[0] {
        Stmt::If {
            then_body,
            else_body,
            ..
        } => {
            assert_eq!(then_body, &vec![Stmt::Pass]);
            assert_eq!(else_body.as_ref().map(Vec::len), Some(1));
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn test_multi_statement_body_at_equal_indent() {
    let stmts = parse_clean("while x:\n    a = 1\n    b = 2\nc = 3");
    assert_eq!(stmts.len(), 2);
    match &stmts[0] {
        Stmt::While { body, .. } => assert_eq!(body.len(), 2),
        other => panic!("expected while statement, got {other:?}"),
    }
}

#[test]
fn test_block_ends_at_dedent() {
    let stmts = parse_clean("if x:\n    if y:\n        a = 1\n    b = 2\nc = 3");
    assert_eq!(stmts.len(), 2);
    match &stmts[0] {
        Stmt::If { then_body, .. } => {
            assert_eq!(then_body.len(), 2);
            match &then_body[0] {
                Stmt::If {
                    then_body: inner, ..
                } => assert_eq!(inner.len(), 1),
                other => panic!("expected nested if, got {other:?}"),
            }
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

#[test]
fn test_nested_else_attaches_to_inner_if() {
    let stmts = parse_clean(
        "if a:\n    if b:\n        pass\n    else:\n        pass\nelse:\n    pass",
    );
    assert_eq!(stmts.len(), 1);
    match &stmts[0] {
        Stmt::If {
            then_body,
            else_body,
            ..
        } => {
            assert!(else_body.is_some());
            match &then_body[0] {
                Stmt::If {
                    else_body: inner_else,
                    ..
                } => assert!(inner_else.is_some()),
                other => panic!("expected nested if, got {other:?}"),
            }
        }
        other => panic!("expected if statement, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// for / while headers
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_for_range_arities() {
    for (source, expected) in [
        ("for i in range(5):\n    pass", 1),
        ("for i in range(2, 5):\n    pass", 2),
        ("for i in range(0, 10, 3):\n    pass", 3),
    ] {
        let stmts = parse_clean(source);
        match &stmts[0] {
            Stmt::For { range_args, .. } => assert_eq!(range_args.len(), expected),
            other => panic!("expected for statement, got {other:?}"),
        }
    }
}

#[test]
fn test_for_with_four_range_args_is_an_error() {
    let outcome = parse("for i in range(1, 2, 3, 4):\n    pass");
    assert!(no_for_statement(&outcome));
    assert!(outcome.errors[0].message.contains("range() takes 1-3 arguments"));
}

#[test]
fn test_for_requires_range_iterable() {
    let outcome = parse("for i in steps:\n    pass");
    assert!(no_for_statement(&outcome));
    assert!(!outcome.errors.is_empty());
}

#[test]
fn test_for_missing_colon_is_an_error() {
    let outcome = parse("for i in range(3)\n    pass");
    assert!(no_for_statement(&outcome));
    assert!(outcome.errors[0].message.contains("expected ':'"));
}

/// The malformed `for` header must be dropped; its orphaned body line may
/// still parse as a top-level statement after recovery.
fn no_for_statement(outcome: &ParseOutcome) -> bool {
    outcome
        .statements
        .iter()
        .all(|s| !matches!(s, Stmt::For { .. }))
}

#[test]
fn test_while_header() {
    let stmts = parse_clean("while x < 3:\n    x = x + 1");
    match &stmts[0] {
        Stmt::While { condition, body } => {
            assert_eq!(
                condition,
                &bin(var("x"), BinOp::Lt, Expr::Number(3))
            );
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected while statement, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Precedence chain
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_multiplicative_binds_tighter_than_additive() {
    assert_eq!(
        parse_expr("1 + 2 * 3"),
        bin(
            Expr::Number(1),
            BinOp::Add,
            bin(Expr::Number(2), BinOp::Mul, Expr::Number(3)),
        )
    );
}

#[test]
fn test_comparison_binds_looser_than_additive() {
    assert_eq!(
        parse_expr("a + 1 > b"),
        bin(
            bin(var("a"), BinOp::Add, Expr::Number(1)),
            BinOp::Gt,
            var("b"),
        )
    );
}

#[test]
fn test_equality_binds_tighter_than_additive() {
    // the chain's signature quirk: `x == 1 + 1` is `(x == 1) + 1`
    assert_eq!(
        parse_expr("x == 1 + 1"),
        bin(
            bin(var("x"), BinOp::Eq, Expr::Number(1)),
            BinOp::Add,
            Expr::Number(1),
        )
    );
}

#[test]
fn test_equality_binds_tighter_than_unary_minus() {
    // `-x == 5` is `-(x == 5)`
    assert_eq!(
        parse_expr("-x == 5"),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(bin(var("x"), BinOp::Eq, Expr::Number(5))),
        }
    );
}

#[test]
fn test_not_binds_looser_than_comparison() {
    // `not a > b` is `not (a > b)`
    assert_eq!(
        parse_expr("not a > b"),
        Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(bin(var("a"), BinOp::Gt, var("b"))),
        }
    );
}

#[test]
fn test_and_or_left_associative() {
    assert_eq!(
        parse_expr("a or b or c"),
        bin(bin(var("a"), BinOp::Or, var("b")), BinOp::Or, var("c"))
    );
    assert_eq!(
        parse_expr("a and b or c"),
        bin(bin(var("a"), BinOp::And, var("b")), BinOp::Or, var("c"))
    );
}

#[test]
fn test_parens_override_precedence() {
    assert_eq!(
        parse_expr("(1 + 2) * 3"),
        bin(
            bin(Expr::Number(1), BinOp::Add, Expr::Number(2)),
            BinOp::Mul,
            Expr::Number(3),
        )
    );
}

#[test]
fn test_unary_minus_on_literal() {
    assert_eq!(
        parse_expr("-7"),
        Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(Expr::Number(7)),
        }
    );
}

#[test]
fn test_range_in_expression_position_is_an_error() {
    // `range` is a keyword, not an identifier, so it has no call form
    // outside a for header
    let outcome = parse("x = range(5)");
    assert!(outcome.statements.is_empty());
    assert!(outcome.errors[0].message.contains("unexpected token 'range'"));
}

// ─────────────────────────────────────────────────────────────────────
// Error recovery
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_malformed_statement_does_not_abort_the_rest() {
    let outcome = parse("x = 1\n)\ny = 2");
    assert_eq!(
        outcome.statements,
        vec![
            Stmt::Assign {
                name: "x".into(),
                value: Expr::Number(1),
            },
            Stmt::Assign {
                name: "y".into(),
                value: Expr::Number(2),
            },
        ]
    );
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].line, 2);
}

#[test]
fn test_recovery_inside_a_block() {
    let outcome = parse("while x:\n    )\n    y = 2\nz = 3");
    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.statements.len(), 2);
    match &outcome.statements[0] {
        Stmt::While { body, .. } => {
            assert_eq!(body.len(), 1, "malformed body line dropped, good one kept");
        }
        other => panic!("expected while statement, got {other:?}"),
    }
}

#[test]
fn test_stray_elif_is_reported_and_skipped() {
    let outcome = parse("elif x:\n    pass\ny = 1");
    assert!(!outcome.errors.is_empty());
    assert!(outcome
        .statements
        .iter()
        .any(|s| matches!(s, Stmt::Assign { name, .. } if name == "y")));
}

#[test]
fn test_parse_never_fails_on_garbage() {
    let outcome = parse(") ( == != : ,\n::\n");
    assert!(outcome.statements.is_empty());
    assert!(!outcome.errors.is_empty());
}
