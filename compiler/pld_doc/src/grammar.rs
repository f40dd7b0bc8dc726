//! The doc-comment grammar table.
//!
//! ```text
//! main ──newline, /**──▶ line_start ──(indent, `*`s)──▶ pop
//!   │ ▲
//!   { [      } ]
//!   ▼ │
//! brace / bracket (nestable; strings recognised, layout is trivia)
//! ```
//!
//! Every state falls back to a one-character `Text` token, so the grammar
//! never fails on odd input.

use std::sync::LazyLock;

use pld_lexer_core::{Grammar, GrammarBuilder, GrammarError, Rule, StateBuilder};

use crate::DocKind;

const NEWLINE: &str = r"\r\n|\r|\n";
const WHITESPACE: &str = r"[^\S\r\n]+";
/// `*/`, absorbing extra stars (`**/`).
const COMMENT_END: &str = r"\**\*/";
const TAG: &str = r"@[\p{Alphabetic}][\w-]*";
const URL: &str = r#"(?:https?|ftps?|file)://(?:[^\s{}\[\]()<>"'|]*[^\s{}\[\]()<>"'|.,;:!?])?"#;
const IDENTIFIER: &str = r"[\p{Alphabetic}_][\w$#]*";
const NUMBER: &str = r"\d+(?:\.\d+)?";
const STRING: &str = r#""(?:[^"\\\r\n]|\\.)*"|'(?:[^'\\\r\n]|\\.)*'"#;
const ESCAPE: &str = r"\\[@{}\[\]#\\*]";
const TEXT: &str = r"[^\s\w@{}\[\]()#=,.|:\\*/]+";

static GRAMMAR: LazyLock<Grammar<DocKind>> = LazyLock::new(|| {
    #[allow(
        clippy::expect_used,
        reason = "the table is static; any error is caught by the grammar tests"
    )]
    build().expect("doc-comment grammar table is valid")
});

/// The compiled grammar, built on first use.
pub fn doc() -> &'static Grammar<DocKind> {
    &GRAMMAR
}

fn tag_value(text: &str) -> String {
    text.trim_start_matches('@').to_lowercase()
}

fn escape_value(text: &str) -> String {
    text.trim_start_matches('\\').to_owned()
}

/// Rules shared by every content state, after the state's own closers.
fn content_rules(state: StateBuilder<DocKind>, structured: bool) -> StateBuilder<DocKind> {
    let state = state
        .pattern(DocKind::CommentEnd, COMMENT_END)
        .rule(Rule::pattern(DocKind::Newline, NEWLINE).push("line_start"))
        .pattern(DocKind::Whitespace, WHITESPACE)
        .rule(Rule::pattern(DocKind::Tag, TAG).value(tag_value))
        .pattern(DocKind::Url, URL)
        .rule(Rule::pattern(DocKind::Escape, ESCAPE).value(escape_value))
        .pattern(DocKind::Identifier, IDENTIFIER)
        .pattern(DocKind::Number, NUMBER);
    let state = if structured {
        state.pattern(DocKind::String, STRING)
    } else {
        state
    };
    state
        .rule(Rule::literal(DocKind::LBrace, "{").push("brace"))
        .rule(Rule::literal(DocKind::LBracket, "[").push("bracket"))
        .literal(DocKind::Hash, "#")
        .literal(DocKind::LParen, "(")
        .literal(DocKind::RParen, ")")
        .literal(DocKind::Equals, "=")
        .literal(DocKind::Comma, ",")
        .literal(DocKind::Dot, ".")
        .literal(DocKind::Pipe, "|")
        .literal(DocKind::Colon, ":")
        .pattern(DocKind::Text, TEXT)
        .fallback_token(DocKind::Text)
}

/// Compile the grammar table.
pub fn build() -> Result<Grammar<DocKind>, GrammarError> {
    GrammarBuilder::new()
        .state("main", |s| {
            let s = s.rule(Rule::literal(DocKind::CommentStart, "/**").push("line_start"));
            // Unbalanced closers are plain text here.
            content_rules(s, false)
                .literal(DocKind::RBrace, "}")
                .literal(DocKind::RBracket, "]")
        })
        .state("line_start", |s| {
            s.rule(Rule::pattern(DocKind::CommentEnd, COMMENT_END).pop())
                .pattern(DocKind::Whitespace, WHITESPACE)
                .rule(Rule::pattern(DocKind::Decoration, r"\*+").pop())
                .fallback_pop()
        })
        .state("brace", |s| {
            let s = s
                .rule(Rule::literal(DocKind::RBrace, "}").pop())
                .literal(DocKind::RBracket, "]");
            content_rules(s, true)
        })
        .state("bracket", |s| {
            let s = s
                .rule(Rule::literal(DocKind::RBracket, "]").pop())
                .literal(DocKind::RBrace, "}");
            content_rules(s, true)
        })
        .build()
}
