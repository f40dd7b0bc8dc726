//! PL/SQL lexer.
//!
//! Built on the table-driven engine in `pld_lexer_core`. The grammar in
//! [`grammar`] splits source text into raw pieces; the cooking layer merges
//! comment pieces into one token per comment, classifies words against the
//! keyword tables and de-quotes strings and quoted identifiers.
//!
//! ```text
//! source → Lexer<SqlKind> (raw) → Tokens (cooked) → parser
//! ```
//!
//! Cooked tokens are lossless: concatenating every token's `text`
//! reproduces the input.

mod cooker;
pub mod grammar;
pub mod keywords;
mod kind;

use std::sync::Arc;

use pld_ir::{Token, TokenGroup};

pub use cooker::Tokens;
pub use keywords::WordClass;
pub use kind::SqlKind;
pub use pld_lexer_core::LexError;

/// A cooked PL/SQL token.
pub type SqlToken = Token<SqlKind>;

/// Trivia plus the significant token it precedes.
pub type SqlGroup = TokenGroup<SqlKind>;

/// Tokenize PL/SQL source.
pub fn lex(source: &str) -> Tokens<'_> {
    Tokens::new(source, None)
}

/// Tokenize PL/SQL source, tagging every position with `filename`.
pub fn lex_with_filename(source: &str, filename: Option<Arc<str>>) -> Tokens<'_> {
    Tokens::new(source, filename)
}
