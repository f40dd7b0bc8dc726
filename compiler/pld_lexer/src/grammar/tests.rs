#![allow(clippy::unwrap_used, clippy::expect_used)]

use pld_lexer_core::Lexer;

use super::*;
use pretty_assertions::assert_eq;

fn raw(text: &str) -> Vec<(SqlKind, String)> {
    Lexer::new(plsql(), text)
        .map(|token| {
            let token = token.unwrap();
            (token.kind, token.text)
        })
        .collect()
}

fn kinds(text: &str) -> Vec<SqlKind> {
    raw(text).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn table_compiles() {
    let grammar = build().unwrap();
    assert_eq!(grammar.state_count(), 3);
    assert_eq!(grammar.state_name(grammar.start()), "main");
}

#[test]
fn words_and_punctuation() {
    assert_eq!(
        kinds("emp_pkg.get_name(p_id);"),
        vec![
            SqlKind::Word,
            SqlKind::Dot,
            SqlKind::Word,
            SqlKind::LParen,
            SqlKind::Word,
            SqlKind::RParen,
            SqlKind::Semicolon,
        ]
    );
}

#[test]
fn word_characters() {
    assert_eq!(raw("a$b#c_1"), vec![(SqlKind::Word, "a$b#c_1".to_string())]);
}

#[test]
fn compound_operators() {
    let ops: Vec<String> = raw(":= => .. || ** <> != ^= ~= <= >= << >>")
        .into_iter()
        .filter(|(kind, _)| *kind == SqlKind::Operator)
        .map(|(_, text)| text)
        .collect();
    assert_eq!(
        ops,
        vec![":=", "=>", "..", "||", "**", "<>", "!=", "^=", "~=", "<=", ">=", "<<", ">>"]
    );
}

#[test]
fn numbers() {
    for text in ["42", "3.14", ".5", "1e10", "2.5E-3", "1.5f", "7d"] {
        assert_eq!(kinds(text), vec![SqlKind::Number], "{text}");
    }
    assert_eq!(
        kinds("1..10"),
        vec![SqlKind::Number, SqlKind::Operator, SqlKind::Number]
    );
}

#[test]
fn strings() {
    for text in [
        "'plain'",
        "'it''s'",
        "N'national'",
        "q'[bracket ' quote]'",
        "Q'{brace}'",
        "q'(paren)'",
        "q'<angle>'",
        "q'!bang!'",
        "nq'[both]'",
    ] {
        assert_eq!(kinds(text), vec![SqlKind::String], "{text}");
    }
}

#[test]
fn q_quote_spans_lines() {
    assert_eq!(kinds("q'[a\nb]'"), vec![SqlKind::String]);
}

#[test]
fn quoted_identifier() {
    assert_eq!(
        raw(r#""My ""Odd"" Name""#),
        vec![(SqlKind::QuotedIdentifier, r#""My ""Odd"" Name""#.to_string())]
    );
}

#[test]
fn binds_and_substitutions() {
    assert_eq!(
        raw(":p_id &name &&twice &x."),
        vec![
            (SqlKind::Bind, ":p_id".to_string()),
            (SqlKind::Whitespace, " ".to_string()),
            (SqlKind::Substitution, "&name".to_string()),
            (SqlKind::Whitespace, " ".to_string()),
            (SqlKind::Substitution, "&&twice".to_string()),
            (SqlKind::Whitespace, " ".to_string()),
            (SqlKind::Substitution, "&x.".to_string()),
        ]
    );
}

#[test]
fn line_comment_stops_before_newline() {
    assert_eq!(
        kinds("-- note\nx"),
        vec![
            SqlKind::LineOpen,
            SqlKind::CommentText,
            SqlKind::Newline,
            SqlKind::Word,
        ]
    );
}

#[test]
fn block_comment_pieces() {
    assert_eq!(
        kinds("/** a * b */"),
        vec![
            SqlKind::BlockOpen,
            SqlKind::CommentText,
            SqlKind::CommentText,
            SqlKind::CommentText,
            SqlKind::CommentText,
            SqlKind::BlockClose,
        ]
    );
}

#[test]
fn newline_forms() {
    assert_eq!(
        raw("\r\n\n\r"),
        vec![
            (SqlKind::Newline, "\r\n".to_string()),
            (SqlKind::Newline, "\n".to_string()),
            (SqlKind::Newline, "\r".to_string()),
        ]
    );
}

#[test]
fn unknown_characters_do_not_abort() {
    assert_eq!(
        kinds("a ` b"),
        vec![
            SqlKind::Word,
            SqlKind::Whitespace,
            SqlKind::Unknown,
            SqlKind::Whitespace,
            SqlKind::Word,
        ]
    );
}

#[test]
fn unterminated_string_falls_back() {
    let kinds = kinds("'abc");
    assert_eq!(kinds[0], SqlKind::Unknown);
    assert_eq!(kinds[1], SqlKind::Word);
}
