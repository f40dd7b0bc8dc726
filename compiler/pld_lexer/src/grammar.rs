//! The PL/SQL grammar table.
//!
//! Three states: `main`, `line_comment`, `block_comment`. Only an
//! unterminated block comment is fatal; anything else unrecognised becomes
//! an [`SqlKind::Unknown`] token.

use std::sync::LazyLock;

use pld_lexer_core::{Grammar, GrammarBuilder, GrammarError, Rule};

use crate::SqlKind;

/// Word characters after the first letter.
const WORD: &str = r"[\p{Alphabetic}][\p{Alphabetic}\p{Nd}_$#]*";

/// Alternative-quoting delimiters: `q'[..]'`, `q'{..}'`, `q'(..)'`,
/// `q'<..>'` and the same-character forms.
const Q_QUOTE: &str = concat!(
    r"[nN]?[qQ]'(?:",
    r"\[(?s:.*?)\]'",
    r"|\{(?s:.*?)\}'",
    r"|\((?s:.*?)\)'",
    r"|<(?s:.*?)>'",
    r"|!(?s:.*?)!'",
    r"|\|(?s:.*?)\|'",
    r"|#(?s:.*?)#'",
    r"|~(?s:.*?)~'",
    r")",
);

static GRAMMAR: LazyLock<Grammar<SqlKind>> = LazyLock::new(|| {
    #[allow(
        clippy::expect_used,
        reason = "the table is static; any error is caught by the grammar tests"
    )]
    build().expect("PL/SQL grammar table is valid")
});

/// The compiled grammar, built on first use.
pub fn plsql() -> &'static Grammar<SqlKind> {
    &GRAMMAR
}

/// Compile the grammar table.
pub fn build() -> Result<Grammar<SqlKind>, GrammarError> {
    GrammarBuilder::new()
        .state("main", |s| {
            s.pattern(SqlKind::Newline, r"\r\n|\r|\n")
                .pattern(SqlKind::Whitespace, r"[^\S\r\n]+")
                .rule(Rule::literal(SqlKind::LineOpen, "--").push("line_comment"))
                .rule(Rule::literal(SqlKind::BlockOpen, "/*").push("block_comment"))
                .pattern(SqlKind::QuotedIdentifier, r#""(?:[^"]|"")*""#)
                .pattern(SqlKind::String, Q_QUOTE)
                .pattern(SqlKind::String, r"[nN]?'(?:[^']|'')*'")
                .pattern(
                    SqlKind::Number,
                    r"(?:\d+(?:\.\d+)?|\.\d+)(?:[eE][+-]?\d+)?[fFdD]?",
                )
                .pattern(SqlKind::Word, WORD)
                .pattern(SqlKind::Bind, format!(r":(?:{WORD}|\d+)"))
                .pattern(SqlKind::Substitution, format!(r"&&?(?:{WORD}|\d+)\.?"))
                .pattern(
                    SqlKind::Operator,
                    r":=|=>|\.\.|\|\||\*\*|<>|!=|\^=|~=|<=|>=|<<|>>",
                )
                .literal(SqlKind::LParen, "(")
                .literal(SqlKind::RParen, ")")
                .literal(SqlKind::Comma, ",")
                .literal(SqlKind::Semicolon, ";")
                .literal(SqlKind::Dot, ".")
                .literal(SqlKind::Percent, "%")
                .literal(SqlKind::At, "@")
                .literal(SqlKind::Slash, "/")
                .pattern(SqlKind::Operator, r"[-+*<>=|!^~:?\[\]{}]")
                .fallback_token(SqlKind::Unknown)
        })
        .state("line_comment", |s| {
            s.pattern(SqlKind::CommentText, r"[^\r\n]+").fallback_pop()
        })
        .state("block_comment", |s| {
            s.rule(Rule::literal(SqlKind::BlockClose, "*/").pop())
                .pattern(SqlKind::CommentText, r"[^*]+|\*")
                .must_close("block comment")
        })
        .build()
}

#[cfg(test)]
mod tests;
