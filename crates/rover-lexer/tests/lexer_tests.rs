//! Lexer integration tests.
//!
//! Covers: keyword recognition with the alphanumeric lookahead guard,
//! bespoke `in` handling, operators (two-char before one-char), literals,
//! string quirks, comment and blank-line skipping, and the per-line
//! Indent/Newline stream invariant.

use rover_lexer::{tokenize, TokenKind};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Tokenize and return just the kinds.
fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

/// Tokenize a single line and return its content kinds, without the
/// surrounding Indent/Newline/Eof.
fn content(source: &str) -> Vec<TokenKind> {
    let all = kinds(source);
    all.into_iter()
        .filter(|k| {
            !matches!(
                k,
                TokenKind::Indent(_) | TokenKind::Newline | TokenKind::Eof
            )
        })
        .collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.into())
}

// ─────────────────────────────────────────────────────────────────────
// Keywords
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_all_keywords() {
    let pairs = [
        ("if", TokenKind::If),
        ("elif", TokenKind::Elif),
        ("else", TokenKind::Else),
        ("for", TokenKind::For),
        ("while", TokenKind::While),
        ("pass", TokenKind::Pass),
        ("and", TokenKind::And),
        ("or", TokenKind::Or),
        ("not", TokenKind::Not),
        ("in", TokenKind::In),
        ("range", TokenKind::Range),
    ];
    for (src, expected) in &pairs {
        assert_eq!(content(src), vec![expected.clone()], "keyword '{src}'");
    }
}

#[test]
fn test_keyword_lookahead_guard() {
    // A keyword followed by an identifier character is part of an identifier
    assert_eq!(content("iffy"), vec![ident("iffy")]);
    assert_eq!(content("elifx"), vec![ident("elifx")]);
    assert_eq!(content("forty"), vec![ident("forty")]);
    assert_eq!(content("organ"), vec![ident("organ")]);
    assert_eq!(content("nothing"), vec![ident("nothing")]);
    assert_eq!(content("passing"), vec![ident("passing")]);
    assert_eq!(content("ranger"), vec![ident("ranger")]);
    assert_eq!(content("while_1"), vec![ident("while_1")]);
}

#[test]
fn test_in_keyword_lookahead_guard() {
    // `in` has bespoke matching but the same lookahead rule
    assert_eq!(content("index"), vec![ident("index")]);
    assert_eq!(content("in_bounds"), vec![ident("in_bounds")]);
    assert_eq!(
        content("i in range"),
        vec![ident("i"), TokenKind::In, TokenKind::Range]
    );
}

#[test]
fn test_for_header_token_sequence() {
    assert_eq!(
        content("for i in range(3):"),
        vec![
            TokenKind::For,
            ident("i"),
            TokenKind::In,
            TokenKind::Range,
            TokenKind::LParen,
            TokenKind::Number(3),
            TokenKind::RParen,
            TokenKind::Colon,
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_two_char_operators_before_prefixes() {
    assert_eq!(
        content("a <= b >= c == d != e"),
        vec![
            ident("a"),
            TokenKind::LessEq,
            ident("b"),
            TokenKind::GreaterEq,
            ident("c"),
            TokenKind::EqEq,
            ident("d"),
            TokenKind::BangEq,
            ident("e"),
        ]
    );
}

#[test]
fn test_single_char_operators() {
    assert_eq!(
        content("a < b > c + d - e * f % g = h"),
        vec![
            ident("a"),
            TokenKind::Less,
            ident("b"),
            TokenKind::Greater,
            ident("c"),
            TokenKind::Plus,
            ident("d"),
            TokenKind::Minus,
            ident("e"),
            TokenKind::Star,
            ident("f"),
            TokenKind::Percent,
            ident("g"),
            TokenKind::Eq,
            ident("h"),
        ]
    );
}

#[test]
fn test_floor_div_vs_lone_slash() {
    assert_eq!(
        content("a // b"),
        vec![ident("a"), TokenKind::FloorDiv, ident("b")]
    );
    // a single `/` is not a token and is silently skipped
    assert_eq!(content("a / b"), vec![ident("a"), ident("b")]);
}

#[test]
fn test_dot_and_punctuation() {
    assert_eq!(
        content("bot.move_forward()"),
        vec![
            ident("bot"),
            TokenKind::Dot,
            ident("move_forward"),
            TokenKind::LParen,
            TokenKind::RParen,
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_numbers_are_unsigned_at_lex_level() {
    // `-7` is Minus followed by Number(7); the parser builds the negation
    assert_eq!(
        content("-7"),
        vec![TokenKind::Minus, TokenKind::Number(7)]
    );
}

#[test]
fn test_string_double_and_single_quotes() {
    assert_eq!(content("\"north\""), vec![TokenKind::Str("north".into())]);
    assert_eq!(content("'east'"), vec![TokenKind::Str("east".into())]);
}

#[test]
fn test_string_no_escape_processing() {
    // backslash is just a character; the first matching quote ends the scan
    assert_eq!(
        content(r#""a\n b""#),
        vec![TokenKind::Str(r"a\n b".into())]
    );
}

#[test]
fn test_string_mixed_quotes_do_not_terminate() {
    assert_eq!(
        content(r#""it's fine""#),
        vec![TokenKind::Str("it's fine".into())]
    );
}

#[test]
fn test_unterminated_string_consumes_to_end_of_line() {
    // legacy-compatible: no error, the rest of the line becomes the literal
    assert_eq!(
        content("\"no closing quote here"),
        vec![TokenKind::Str("no closing quote here".into())]
    );
    // the next line is unaffected
    let k = kinds("x = \"open\ny = 2");
    assert!(k.contains(&TokenKind::Str("open".into())));
    assert!(k.contains(&TokenKind::Ident("y".into())));
}

// ─────────────────────────────────────────────────────────────────────
// Line structure
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_every_content_line_has_one_indent_and_one_newline() {
    let source = "x = 1\n\n# comment\nif x > 0:\n    bot.turn_left()\n";
    let tokens = tokenize(source);
    let indents = tokens
        .iter()
        .filter(|t| matches!(t.kind, TokenKind::Indent(_)))
        .count();
    let newlines = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Newline)
        .count();
    assert_eq!(indents, 3);
    assert_eq!(newlines, 3);
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_line_numbers_are_one_based_and_skip_comments() {
    let tokens = tokenize("# header\nx = 1\n\ny = 2\n");
    let x = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Ident("x".into()))
        .unwrap();
    let y = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Ident("y".into()))
        .unwrap();
    assert_eq!(x.line, 2);
    assert_eq!(y.line, 4);
}

#[test]
fn test_indented_comment_line_is_skipped() {
    // comment detection runs on the trimmed line
    assert_eq!(kinds("    # indented comment"), vec![TokenKind::Eof]);
}

#[test]
fn test_empty_source_is_just_eof() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn test_crlf_lines() {
    let k = kinds("x = 1\r\ny = 2\r\n");
    assert!(k.contains(&TokenKind::Ident("x".into())));
    assert!(k.contains(&TokenKind::Ident("y".into())));
}
