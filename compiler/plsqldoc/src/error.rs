use pld_diagnostic::Diagnostic;
use pld_ir::{Position, PositionFormat};
use pld_lexer::LexError;
use pld_parse::{ParseError, SyntaxError};

/// Why a file produced no [`Document`](crate::Document).
///
/// Displays as `<position>: <message>`, the position rendered with the
/// run's [`PositionFormat`].
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FileError {
    #[error("{}: {source}", located(.source.position(), .format))]
    Lex {
        source: LexError,
        format: PositionFormat,
    },
    #[error("{}: {source}", located(&.source.at, .format))]
    Syntax {
        source: SyntaxError,
        format: PositionFormat,
    },
}

impl FileError {
    pub(crate) fn new(err: ParseError, format: PositionFormat) -> Self {
        match err {
            ParseError::Lex(source) => FileError::Lex { source, format },
            ParseError::Syntax(source) => FileError::Syntax { source, format },
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            FileError::Lex { source, .. } => source.position(),
            FileError::Syntax { source, .. } => &source.at,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FileError::Lex { source, .. } => source.to_diagnostic(),
            FileError::Syntax { source, .. } => source.to_diagnostic(),
        }
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "the error derive passes fields by reference"
)]
fn located(position: &Position, format: &PositionFormat) -> String {
    position.display(*format).to_string()
}
