//! Parse errors.

use pld_diagnostic::{Diagnostic, ErrorCode};
use pld_ir::Position;
use pld_lexer::{LexError, SqlToken};

/// A mandated token is missing. Aborts the current file.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct SyntaxError {
    /// What the grammar required, e.g. "`IS` or `AS`".
    pub expected: String,
    /// What was there instead, or "end of input".
    pub found: String,
    pub at: Position,
    /// Construct being parsed, for the "while parsing" note.
    pub context: Option<&'static str>,
}

impl SyntaxError {
    pub(crate) fn new(expected: impl Into<String>, found: Option<&SqlToken>, end: Position) -> Self {
        let (found, at) = match found {
            Some(token) => (format!("`{}`", token.text), token.span.start.clone()),
            None => ("end of input".to_owned(), end),
        };
        SyntaxError {
            expected: expected.into(),
            found,
            at,
            context: None,
        }
    }

    #[must_use]
    pub(crate) fn while_parsing(mut self, context: &'static str) -> Self {
        self.context.get_or_insert(context);
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(ErrorCode::E1001)
            .with_message(self.to_string())
            .at(self.at.clone());
        match self.context {
            Some(context) => diagnostic.with_note(format!("while parsing {context}")),
            None => diagnostic,
        }
    }
}

/// Why a file could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl ParseError {
    pub fn position(&self) -> &Position {
        match self {
            ParseError::Lex(err) => err.position(),
            ParseError::Syntax(err) => &err.at,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ParseError::Lex(err) => err.to_diagnostic(),
            ParseError::Syntax(err) => err.to_diagnostic(),
        }
    }
}
