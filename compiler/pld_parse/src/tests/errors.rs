use pld_ir::{Position, PositionFormat};
use pld_lexer::LexError;
use pretty_assertions::assert_eq;

use crate::{parse_source, NodeKind, ParseError, SyntaxError, SyntaxTree};

fn outcomes(source: &str) -> Vec<Result<SyntaxTree, ParseError>> {
    parse_source(source).collect()
}

fn syntax_error(result: &Result<SyntaxTree, ParseError>) -> &SyntaxError {
    match result {
        Err(ParseError::Syntax(err)) => err,
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn missing_is_or_as() {
    let results = outcomes("CREATE PACKAGE p PROCEDURE f;");
    assert_eq!(results.len(), 1);
    let err = syntax_error(&results[0]);
    assert_eq!(err.to_string(), "expected `IS` or `AS`, found `PROCEDURE`");
    assert_eq!(err.at, Position::new(1, 18));
    assert_eq!(err.context, Some("package"));
}

#[test]
fn end_of_input_points_after_last_token() {
    let results = outcomes("CREATE PACKAGE p IS");
    let err = syntax_error(&results[0]);
    assert_eq!(err.found, "end of input");
    assert_eq!(err.expected, "`END`");
    assert_eq!(err.at, Position::new(1, 20));
}

#[test]
fn earlier_statements_survive_and_error_ends_file() {
    let results = outcomes(
        "SET ECHO ON\n\
         CREATE PACKAGE p IS\n\
         \x20 PROCEDURE f(;\n\
         END;\n\
         CREATE PACKAGE q IS END;",
    );
    assert_eq!(results.len(), 2);
    let first = results[0].as_ref().unwrap();
    assert_eq!(first.kind(first.root()), NodeKind::SqlPlus);

    let err = syntax_error(&results[1]);
    assert_eq!(err.expected, "a name");
    assert_eq!(err.found, "`;`");
    assert_eq!(err.at, Position::new(3, 15));
    assert_eq!(err.context, Some("a procedure or function declaration"));
}

#[test]
fn syntax_error_diagnostic() {
    let results = outcomes("CREATE PACKAGE p PROCEDURE f;");
    let Err(err) = &results[0] else {
        panic!("expected an error");
    };
    assert_eq!(err.position(), &Position::new(1, 18));
    assert_eq!(
        err.to_diagnostic().display(PositionFormat::LineColumn).to_string(),
        "1:18: error[E1001]: expected `IS` or `AS`, found `PROCEDURE`\n  = note: while parsing package"
    );
}

#[test]
fn unterminated_comment_inside_unit() {
    let results = outcomes("SET ECHO ON\nCREATE PACKAGE p IS /* open");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert_eq!(
        results[1],
        Err(ParseError::Lex(LexError::Unterminated {
            state: "block comment",
            at: Position::new(2, 21),
        }))
    );
}

#[test]
fn lex_error_after_complete_statements() {
    let results = outcomes("CREATE PACKAGE p IS END;\n/* open");
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    let Err(ParseError::Lex(err)) = &results[1] else {
        panic!("expected a lex error");
    };
    assert_eq!(err.position(), &Position::new(2, 1));
}

#[test]
fn iterator_is_fused_after_error() {
    let mut statements = parse_source("CREATE PACKAGE p IS");
    assert!(matches!(statements.next(), Some(Err(_))));
    assert!(statements.next().is_none());
    assert!(statements.next().is_none());
}
