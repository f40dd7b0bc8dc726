//! Lexer and grammar construction errors.

use pld_diagnostic::{Diagnostic, ErrorCode};
use pld_ir::Position;

/// A fatal tokenization error. Aborts the current text only.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LexError {
    /// No rule in the current state matches and the state has no fallback.
    #[error("unexpected character {found:?} in {state}")]
    UnexpectedChar {
        found: char,
        state: &'static str,
        at: Position,
    },
    /// End of input reached inside a state that must be closed. `at` is
    /// where the state was entered, not end of input.
    #[error("unterminated {state}")]
    Unterminated { state: &'static str, at: Position },
    /// Zero-width fallbacks cycled without consuming input.
    #[error("lexer made no progress in {state}")]
    Stalled { state: &'static str, at: Position },
}

impl LexError {
    /// Where the error is reported.
    pub fn position(&self) -> &Position {
        match self {
            LexError::UnexpectedChar { at, .. }
            | LexError::Unterminated { at, .. }
            | LexError::Stalled { at, .. } => at,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            LexError::UnexpectedChar { .. } => ErrorCode::E0001,
            LexError::Unterminated { .. } => ErrorCode::E0002,
            LexError::Stalled { .. } => ErrorCode::E0003,
        }
    }

    /// Convert to a diagnostic for the sink.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .at(self.position().clone())
    }
}

/// A grammar table that cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("grammar has no states")]
    NoStates,
    #[error("grammar has more than {} states", u16::MAX)]
    TooManyStates,
    #[error("state `{0}` is defined twice")]
    DuplicateState(&'static str),
    #[error("state `{from}` refers to unknown state `{target}`")]
    UnknownState {
        from: &'static str,
        target: &'static str,
    },
    #[error("invalid pattern `{pattern}` in state `{state}`")]
    InvalidPattern {
        state: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("rule `{pattern}` in state `{state}` can match empty input")]
    EmptyMatch {
        state: &'static str,
        pattern: String,
    },
}
