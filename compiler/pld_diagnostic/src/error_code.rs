use std::fmt;

/// Codes for every diagnostic the pipeline emits.
///
/// Format: `E####` for fatal errors, `W####` for warnings; the first digit
/// names the phase:
/// - 0: lexer
/// - 1: parser
/// - 2: context resolution
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Character matches no rule in the current lexer state
    E0001,
    /// Block comment or other delimited state never closed
    E0002,
    /// Lexer made no progress
    E0003,
    /// Required token missing
    E1001,
    /// Syntax node matched no resolver rule
    W2001,
    /// Tag names a parameter, field or exception that does not exist
    W2002,
    /// Tag repeats a parameter or field already documented
    W2003,
    /// Doc comment could not be tokenized
    W2004,
}

impl ErrorCode {
    /// The code as written in diagnostics (e.g., `"E1001"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E1001 => "E1001",
            ErrorCode::W2001 => "W2001",
            ErrorCode::W2002 => "W2002",
            ErrorCode::W2003 => "W2003",
            ErrorCode::W2004 => "W2004",
        }
    }

    /// Short description for `--explain`-style listings.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unexpected character",
            ErrorCode::E0002 => "unterminated delimited text",
            ErrorCode::E0003 => "lexer made no progress",
            ErrorCode::E1001 => "syntax error",
            ErrorCode::W2001 => "unresolved construct",
            ErrorCode::W2002 => "orphan tag",
            ErrorCode::W2003 => "duplicate tag",
            ErrorCode::W2004 => "malformed doc comment",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
