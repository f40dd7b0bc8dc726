//! Token cooking.
//!
//! Turns the raw grammar output into parser-ready tokens:
//!
//! - comment pieces (`--`, `/*`, text runs, `*/`) merge into one
//!   `LineComment`, `BlockComment` or `DocComment` token whose value is the
//!   comment body;
//! - words are classified through [`keywords::classify`] and their value
//!   uppercased;
//! - quoted identifiers and strings get their unquoted value.

use std::iter::Peekable;
use std::sync::Arc;

use pld_ir::{normalize_identifier, Token};
use pld_lexer_core::{LexError, Lexer};

use crate::keywords::{self, WordClass};
use crate::{grammar, SqlKind, SqlToken};

/// Cooked PL/SQL tokens, produced lazily.
///
/// Yields `Err` at most once (an unterminated block comment) and then
/// stops.
pub struct Tokens<'s> {
    raw: Peekable<Lexer<'static, 's, SqlKind>>,
}

impl<'s> Tokens<'s> {
    pub(crate) fn new(source: &'s str, filename: Option<Arc<str>>) -> Self {
        Tokens {
            raw: Lexer::new(grammar::plsql(), source)
                .with_filename(filename)
                .peekable(),
        }
    }

    /// Merge `--` and the text after it.
    fn line_comment(&mut self, open: SqlToken) -> SqlToken {
        let mut text = open.text;
        let mut span = open.span;
        while let Some(Ok(piece)) = self
            .raw
            .next_if(|next| matches!(next, Ok(t) if t.kind == SqlKind::CommentText))
        {
            text.push_str(&piece.text);
            span = span.merge(&piece.span);
        }
        let body = text[2..].to_owned();
        Token::new(SqlKind::LineComment, text, span).with_value(body)
    }

    /// Merge `/*`, the body and `*/`.
    fn block_comment(&mut self, open: SqlToken) -> Result<SqlToken, LexError> {
        let mut text = open.text;
        let mut span = open.span;
        let mut closed = false;
        while !closed {
            let Some(piece) = self.raw.next() else {
                break;
            };
            let piece = piece?;
            closed = piece.kind == SqlKind::BlockClose;
            text.push_str(&piece.text);
            span = span.merge(&piece.span);
        }

        let body_end = if closed { text.len() - 2 } else { text.len() };
        let kind = if text.starts_with("/**") && text.len() > "/**/".len() {
            SqlKind::DocComment
        } else {
            SqlKind::BlockComment
        };
        let body_start = if kind == SqlKind::DocComment { 3 } else { 2 };
        let body = text
            .get(body_start..body_end)
            .unwrap_or_default()
            .to_owned();
        Ok(Token::new(kind, text, span).with_value(body))
    }
}

/// Classify a word and uppercase its value.
fn cook_word(token: SqlToken) -> SqlToken {
    let kind = match keywords::classify(&token.text) {
        Some(WordClass::Reserved) => SqlKind::Reserved,
        Some(WordClass::Keyword) => SqlKind::Keyword,
        Some(WordClass::Pseudo) | None => SqlKind::Identifier,
    };
    let value = token.text.to_uppercase();
    Token::new(kind, token.text, token.span).with_value(value)
}

/// Unquote a string literal: `'it''s'`, `N'x'`, `q'[x]'`.
pub(crate) fn unquote_string(text: &str) -> String {
    let text = text.strip_prefix(['n', 'N']).unwrap_or(text);
    if let Some(quoted) = text.strip_prefix(['q', 'Q']) {
        // q'<open>...<close>'
        let mut chars = quoted.chars();
        chars.next();
        chars.next();
        chars.next_back();
        chars.next_back();
        return chars.as_str().to_owned();
    }
    text.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(text)
        .replace("''", "'")
}

impl Iterator for Tokens<'_> {
    type Item = Result<SqlToken, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = match self.raw.next()? {
            Ok(token) => token,
            Err(err) => {
                tracing::debug!(%err, "lexing stopped");
                return Some(Err(err));
            }
        };

        let cooked = match token.kind {
            SqlKind::LineOpen => self.line_comment(token),
            SqlKind::BlockOpen => return Some(self.block_comment(token)),
            SqlKind::Word => cook_word(token),
            SqlKind::QuotedIdentifier => {
                let value = normalize_identifier(&token.text);
                token.with_value(value)
            }
            SqlKind::String => {
                let value = unquote_string(&token.text);
                token.with_value(value)
            }
            _ => token,
        };
        Some(Ok(cooked))
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}
