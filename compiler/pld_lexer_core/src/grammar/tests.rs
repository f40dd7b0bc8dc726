#![allow(clippy::unwrap_used, clippy::expect_used)]

use pld_ir::Trivia;

use super::*;
use pretty_assertions::assert_eq;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Kind {
    Word,
    Open,
    Close,
}

impl TokenKind for Kind {
    fn trivia(self) -> Trivia {
        Trivia::No
    }
}

fn two_states() -> GrammarBuilder<Kind> {
    GrammarBuilder::new()
        .state("main", |s| {
            s.rule(Rule::literal(Kind::Open, "(").push("inner"))
                .pattern(Kind::Word, "[a-z]+")
        })
        .state("inner", |s| {
            s.rule(Rule::literal(Kind::Close, ")").pop())
                .fallback_pop()
        })
}

#[test]
fn test_build_resolves_states() {
    let grammar = two_states().build().unwrap();
    assert_eq!(grammar.state_count(), 2);
    assert_eq!(grammar.start(), StateId(0));
    assert_eq!(grammar.state_id("inner"), Some(StateId(1)));
    assert_eq!(grammar.state_name(StateId(1)), "inner");
    assert_eq!(grammar.state_id("missing"), None);
}

#[test]
fn test_build_rejects_empty_grammar() {
    let err = GrammarBuilder::<Kind>::new().build().unwrap_err();
    assert!(matches!(err, GrammarError::NoStates));
}

#[test]
fn test_build_rejects_duplicate_state() {
    let err = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "a"))
        .state("main", |s| s.pattern(Kind::Word, "b"))
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::DuplicateState("main")));
}

#[test]
fn test_build_rejects_unknown_target() {
    let err = GrammarBuilder::new()
        .state("main", |s| s.rule(Rule::literal(Kind::Open, "(").push("nowhere")))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        GrammarError::UnknownState {
            from: "main",
            target: "nowhere"
        }
    ));
}

#[test]
fn test_build_rejects_unknown_fallback_target() {
    let err = GrammarBuilder::<Kind>::new()
        .state("main", |s| s.fallback_next("gone"))
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::UnknownState { target: "gone", .. }));
}

#[test]
fn test_build_rejects_invalid_pattern() {
    let err = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "[a-"))
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::InvalidPattern { state: "main", .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_build_rejects_empty_matches() {
    let err = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "[a-z]*"))
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::EmptyMatch { .. }));

    let err = GrammarBuilder::new()
        .state("main", |s| s.literal(Kind::Word, ""))
        .build()
        .unwrap_err();
    assert!(matches!(err, GrammarError::EmptyMatch { .. }));
}

#[test]
fn test_patterns_are_anchored() {
    let grammar = two_states().build().unwrap();
    let state = grammar.state(grammar.start());
    let word = &state.rules[1];
    assert_eq!(word.match_len("abc def"), Some(3));
    assert_eq!(word.match_len(" abc"), None);
}

#[test]
fn test_alternation_is_anchored_as_a_whole() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| s.pattern(Kind::Word, "x|y"))
        .build()
        .unwrap();
    let rule = &grammar.state(grammar.start()).rules[0];
    assert_eq!(rule.match_len("ay"), None);
    assert_eq!(rule.match_len("ya"), Some(1));
}

#[test]
fn test_value_normalizer() {
    let grammar = GrammarBuilder::new()
        .state("main", |s| {
            s.rule(Rule::pattern(Kind::Word, "[a-z]+").value(|text| text.to_uppercase()))
        })
        .build()
        .unwrap();
    let rule = &grammar.state(grammar.start()).rules[0];
    assert_eq!(rule.value_of("abc"), "ABC");
}

#[test]
fn test_compiled_transitions() {
    let grammar = two_states().build().unwrap();
    let main = grammar.state(grammar.start());
    assert_eq!(main.rules[0].transition, Transition::Push(StateId(1)));
    assert_eq!(main.rules[1].transition, Transition::Stay);
    assert_eq!(main.fallback, Fallback::Error);
    let inner = grammar.state(StateId(1));
    assert_eq!(inner.rules[0].transition, Transition::Pop);
    assert_eq!(inner.fallback, Fallback::Pop);
    assert_eq!(inner.must_close, None);
}
