#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use pld_ir::{Position, Trivia};

use super::*;
use crate::{GrammarBuilder, Rule};
use pretty_assertions::assert_eq;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Kind {
    Word,
    Space,
    Open,
    Close,
    Body,
    Other,
}

impl TokenKind for Kind {
    fn trivia(self) -> Trivia {
        match self {
            Kind::Space => Trivia::Yes,
            _ => Trivia::No,
        }
    }
}

/// Words, whitespace and `/* ... */` comments; anything else is `Other`.
fn comment_grammar() -> Grammar<Kind> {
    GrammarBuilder::new()
        .state("main", |s| {
            s.rule(Rule::literal(Kind::Open, "/*").push("comment"))
                .pattern(Kind::Word, r"[a-z]+")
                .pattern(Kind::Space, r"\s+")
                .fallback_token(Kind::Other)
        })
        .state("comment", |s| {
            s.rule(Rule::literal(Kind::Close, "*/").pop())
                .pattern(Kind::Body, r"[^*]+|\*")
                .must_close("block comment")
        })
        .build()
        .unwrap()
}

fn lex(grammar: &Grammar<Kind>, text: &str) -> Vec<(Kind, String)> {
    Lexer::new(grammar, text)
        .map(|token| {
            let token = token.unwrap();
            (token.kind, token.text)
        })
        .collect()
}

#[test]
fn test_push_and_pop() {
    let grammar = comment_grammar();
    assert_eq!(
        lex(&grammar, "ab /* x * y */cd"),
        vec![
            (Kind::Word, "ab".to_string()),
            (Kind::Space, " ".to_string()),
            (Kind::Open, "/*".to_string()),
            (Kind::Body, " x ".to_string()),
            (Kind::Body, "*".to_string()),
            (Kind::Body, " y ".to_string()),
            (Kind::Close, "*/".to_string()),
            (Kind::Word, "cd".to_string()),
        ]
    );
}

#[test]
fn test_first_matching_rule_wins() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| {
            s.pattern(Kind::Word, "[a-z]+")
                .literal(Kind::Other, "abc")
                .fallback_token(Kind::Other)
        })
        .build()
        .unwrap();
    assert_eq!(lex(&grammar, "abc"), vec![(Kind::Word, "abc".to_string())]);
}

#[test]
fn test_fallback_token_consumes_one_char() {
    let grammar = comment_grammar();
    assert_eq!(
        lex(&grammar, "a+é"),
        vec![
            (Kind::Word, "a".to_string()),
            (Kind::Other, "+".to_string()),
            (Kind::Other, "é".to_string()),
        ]
    );
}

#[test]
fn test_token_spans_track_lines() {
    let grammar = comment_grammar();
    let tokens: Vec<_> = Lexer::new(&grammar, "ab\n  cd").map(Result::unwrap).collect();
    assert_eq!(tokens[0].span.start, Position::new(1, 1));
    assert_eq!(tokens[0].span.end, Position::new(1, 3));
    assert_eq!(tokens[1].span.end, Position::new(2, 3));
    assert_eq!(tokens[2].span.start, Position::new(2, 3));
    assert_eq!(tokens[2].trivia, Trivia::No);
    assert_eq!(tokens[1].trivia, Trivia::Yes);
}

#[test]
fn test_unterminated_reports_entry_position() {
    let grammar = comment_grammar();
    let mut lexer = Lexer::new(&grammar, "x\n  /* never\nclosed");
    let results: Vec<_> = lexer.by_ref().collect();
    let err = results.last().unwrap().clone().unwrap_err();
    assert_eq!(
        err,
        LexError::Unterminated {
            state: "block comment",
            at: Position::new(2, 3),
        }
    );
    assert_eq!(err.to_string(), "unterminated block comment");
    assert!(lexer.next().is_none());
}

#[test]
fn test_unexpected_char_without_fallback() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "[a-z]+"))
        .build()
        .unwrap();
    let results: Vec<_> = Lexer::new(&grammar, "ab!cd").collect();
    assert_eq!(results.len(), 2);
    assert_eq!(
        results[1].clone().unwrap_err(),
        LexError::UnexpectedChar {
            found: '!',
            state: "main",
            at: Position::new(1, 3),
        }
    );
}

#[test]
fn test_fallback_pop_is_zero_width() {
    // `(` enters "args", which only knows words; anything else falls back
    // to "main" without being consumed.
    let grammar = GrammarBuilder::new()
        .state("main", |s| {
            s.rule(Rule::literal(Kind::Open, "(").push("args"))
                .pattern(Kind::Space, " ")
                .fallback_token(Kind::Other)
        })
        .state("args", |s| s.pattern(Kind::Word, "[a-z]+").fallback_pop())
        .build()
        .unwrap();
    assert_eq!(
        lex(&grammar, "(ab) x"),
        vec![
            (Kind::Open, "(".to_string()),
            (Kind::Word, "ab".to_string()),
            (Kind::Other, ")".to_string()),
            (Kind::Space, " ".to_string()),
            (Kind::Other, "x".to_string()),
        ]
    );
}

#[test]
fn test_fallback_next_switches_state() {
    let grammar = GrammarBuilder::new()
        .state("start", |s| s.pattern(Kind::Space, " +").fallback_next("words"))
        .state("words", |s| s.pattern(Kind::Word, "[a-z]+").fallback_token(Kind::Other))
        .build()
        .unwrap();
    assert_eq!(
        lex(&grammar, "  ab c"),
        vec![
            (Kind::Space, "  ".to_string()),
            (Kind::Word, "ab".to_string()),
            (Kind::Other, " ".to_string()),
            (Kind::Word, "c".to_string()),
        ]
    );
}

#[test]
fn test_epsilon_cycle_is_stalled() {
    let grammar = GrammarBuilder::new()
        .state("ping", |s| s.pattern(Kind::Word, "a").fallback_next("pong"))
        .state("pong", |s| s.pattern(Kind::Word, "b").fallback_next("ping"))
        .build()
        .unwrap();
    let results: Vec<_> = Lexer::new(&grammar, "ab!").collect();
    assert_eq!(results.len(), 3);
    let err = results[2].clone().unwrap_err();
    assert!(matches!(err, LexError::Stalled { .. }));
    assert_eq!(err.position(), &Position::new(1, 3));
}

#[test]
fn test_pop_at_bottom_stalls() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "[a-z]+").fallback_pop())
        .build()
        .unwrap();
    let results: Vec<_> = Lexer::new(&grammar, "a1").collect();
    assert!(matches!(results[1], Err(LexError::Stalled { state: "main", .. })));
}

#[test]
fn test_empty_input() {
    let grammar = comment_grammar();
    assert_eq!(Lexer::new(&grammar, "").count(), 0);
}

#[test]
fn test_filename_and_start_position() {
    let grammar = comment_grammar();
    let file: Arc<str> = Arc::from("pkg.pks");
    let token = Lexer::new(&grammar, "ab")
        .with_filename(Some(Arc::clone(&file)))
        .starting_at(Position::new(10, 5).with_filename(Some(Arc::clone(&file))))
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(token.span.start, Position::new(10, 5));
    assert_eq!(token.span.end, Position::new(10, 7));
    assert_eq!(token.span.filename.as_deref(), Some("pkg.pks"));
    assert_eq!(token.span.end.filename.as_deref(), Some("pkg.pks"));
}

#[test]
fn test_current_state_follows_stack() {
    let grammar = comment_grammar();
    let mut lexer = Lexer::new(&grammar, "/* x */");
    assert_eq!(lexer.current_state(), "main");
    lexer.next();
    assert_eq!(lexer.current_state(), "comment");
    lexer.next();
    lexer.next();
    assert_eq!(lexer.current_state(), "main");
    assert_eq!(lexer.position(), &Position::new(1, 8));
}

#[test]
fn test_value_normalizer_applies() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| {
            s.rule(Rule::pattern(Kind::Word, "[a-z]+").value(|text| text.to_uppercase()))
        })
        .build()
        .unwrap();
    let token = Lexer::new(&grammar, "abc").next().unwrap().unwrap();
    assert_eq!(token.text, "abc");
    assert_eq!(token.value, "ABC");
}

mod proptest_lexer {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokens_reassemble_source(text in "[a-z /*+\n]{0,64}") {
            let grammar = comment_grammar();
            let mut rebuilt = String::new();
            for token in Lexer::new(&grammar, &text) {
                match token {
                    Ok(token) => {
                        prop_assert!(!token.text.is_empty());
                        rebuilt.push_str(&token.text);
                    }
                    Err(err) => {
                        let unterminated = matches!(err, LexError::Unterminated { .. });
                        prop_assert!(unterminated);
                    }
                }
            }
            prop_assert_eq!(rebuilt, text);
        }

        #[test]
        fn positions_never_go_backwards(text in "[a-z \n\r]{0,64}") {
            let grammar = comment_grammar();
            let mut last = Position::start();
            for token in Lexer::new(&grammar, &text) {
                let token = token.unwrap();
                prop_assert!(token.span.start >= last);
                prop_assert!(token.span.end > token.span.start);
                last = token.span.end;
            }
        }
    }
}
