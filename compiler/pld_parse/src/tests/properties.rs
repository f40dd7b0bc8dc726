use proptest::prelude::*;

use crate::{parse_source, ParseError};

const VOCABULARY: &[&str] = &[
    "CREATE ", "OR REPLACE ", "PACKAGE ", "BODY ", "TYPE ", "PROCEDURE ", "FUNCTION ", "p ",
    "x ", "IS ", "AS ", "END", ";", "\n/\n", "(", ")", ",", "NUMBER", "RETURN ", "OBJECT ",
    "CURSOR ", "BEGIN ", "SET ", " ", "\n", "-- c\n", "/** d */", ":= 1", "'s'",
];

/// Package text with one procedure per name, separated by `gap`.
fn package(names: &[String], gap: &str) -> String {
    let mut text = format!("CREATE PACKAGE pkg IS{gap}");
    for name in names {
        text.push_str(&format!("PROCEDURE p_{name}({gap}a{gap}NUMBER{gap});{gap}"));
    }
    text.push_str("END;");
    text
}

proptest! {
    #[test]
    fn parsing_always_terminates(
        pieces in proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..40),
    ) {
        let text: String = pieces.concat();
        let mut errors = 0;
        for result in parse_source(&text) {
            if result.is_err() {
                errors += 1;
            }
        }
        prop_assert!(errors <= 1);
    }

    #[test]
    fn statements_cover_the_source(
        pieces in proptest::collection::vec(proptest::sample::select(VOCABULARY), 0..40),
    ) {
        let text: String = pieces.concat();
        let mut rebuilt = String::new();
        let mut failed = false;
        for result in parse_source(&text) {
            match result {
                Ok(tree) => {
                    for group in tree.all_groups() {
                        rebuilt.push_str(&group.text());
                    }
                }
                Err(_) => failed = true,
            }
        }
        prop_assert!(text.starts_with(&rebuilt));
        if !failed {
            // Only trivia may be left over.
            let rest = &text[rebuilt.len()..];
            prop_assert!(pld_lexer::lex(rest).all(|token| token.is_ok_and(|t| t.is_trivia())));
        }
    }

    #[test]
    fn layout_does_not_change_the_tree(
        names in proptest::collection::vec("[a-z]{1,6}", 1..6),
        gap in "[ \t\n]{1,3}",
    ) {
        let outline = |text: &str| -> Result<Vec<String>, ParseError> {
            parse_source(text)
                .map(|tree| tree.map(|tree| tree.outline()))
                .collect()
        };
        let tight = outline(&package(&names, " "));
        let loose = outline(&package(&names, &gap));
        prop_assert!(tight.is_ok());
        prop_assert_eq!(tight, loose);
    }
}
