//! Recursive-descent PL/SQL parser.
//!
//! The parser pulls cooked tokens through a [`TokenStream`] and yields one
//! [`SyntaxTree`] per top-level statement. Package specifications and object
//! types are parsed member by member; package and type bodies, standalone
//! routine bodies and anything outside the documented subset are kept as
//! opaque nodes so no source text is lost.
//!
//! # Errors
//!
//! A missing mandated token is a [`SyntaxError`] and ends the file. A lex
//! error is reported after every statement before it has been yielded.
//!
//! # Layout
//!
//! - `parser.rs`: lookahead, consumption and node-building primitives
//! - `grammar/`: grammar rules as further `impl Parser` blocks
//! - `stream.rs`: token grouping and the lookahead window
//! - `tree.rs`: the statement arena

mod error;
mod grammar;
mod parser;
mod stream;
mod tree;

use std::sync::Arc;

use pld_lexer::{LexError, SqlToken, Tokens};

pub use error::{ParseError, SyntaxError};
pub use parser::Parser;
pub use stream::TokenStream;
pub use tree::{
    MethodKind, NodeId, NodeKind, ParamMode, SyntaxNode, SyntaxTree, TypeDeclKind, UnitKind,
};

/// Statements of one file, parsed on demand.
///
/// Yields `Ok(tree)` per statement. The first error ends the sequence.
pub struct Statements<I> {
    parser: Parser<I>,
    finished: bool,
}

impl<I> Statements<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        Statements {
            parser: Parser::new(tokens),
            finished: false,
        }
    }
}

impl<I> Iterator for Statements<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    type Item = Result<SyntaxTree, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.parser.statement() {
            Ok(true) => {
                let Some(tree) = self.parser.take_tree() else {
                    self.finished = true;
                    return self.parser.take_lex_error().map(|err| Err(err.into()));
                };
                tracing::debug!(kind = %tree.kind(tree.root()), "parsed statement");
                Some(Ok(tree))
            }
            Ok(false) => {
                self.finished = true;
                self.parser.take_lex_error().map(|err| Err(err.into()))
            }
            Err(err) => {
                self.finished = true;
                // Running out of tokens because of a lex error is reported
                // as the lex error.
                let err = match self.parser.take_lex_error() {
                    Some(lex) => ParseError::Lex(lex),
                    None => ParseError::Syntax(err),
                };
                Some(Err(err))
            }
        }
    }
}

impl<I> std::iter::FusedIterator for Statements<I> where
    I: Iterator<Item = Result<SqlToken, LexError>>
{
}

/// Parse a cooked token sequence.
pub fn parse<I>(tokens: I) -> Statements<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    Statements::new(tokens)
}

/// Lex and parse PL/SQL source.
pub fn parse_source(source: &str) -> Statements<Tokens<'_>> {
    parse(pld_lexer::lex(source))
}

/// Lex and parse PL/SQL source, tagging positions with `filename`.
pub fn parse_with_filename(source: &str, filename: Option<Arc<str>>) -> Statements<Tokens<'_>> {
    parse(pld_lexer::lex_with_filename(source, filename))
}

#[cfg(test)]
mod tests;
