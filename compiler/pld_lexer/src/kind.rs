use pld_ir::{Trivia, TokenKind};

/// Token kinds of the PL/SQL grammar.
///
/// The raw grammar emits comment pieces (`LineOpen`, `BlockOpen`,
/// `CommentText`, `BlockClose`) and undifferentiated `Word`s. Cooking
/// replaces them, so the parser never sees those kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SqlKind {
    Whitespace,
    Newline,
    /// `-- ...` up to (not including) the line break.
    LineComment,
    /// `/* ... */`
    BlockComment,
    /// `/** ... */`
    DocComment,

    /// Reserved word; never an identifier.
    Reserved,
    /// Non-reserved keyword; may still name things.
    Keyword,
    Identifier,
    /// `"Mixed Case"`; value is the unquoted name.
    QuotedIdentifier,
    /// `'...'`, `N'...'`, `q'[...]'`; value is the unquoted text.
    String,
    Number,
    /// `:name`
    Bind,
    /// `&name`, `&&name`
    Substitution,

    LParen,
    RParen,
    Comma,
    Semicolon,
    Dot,
    Percent,
    At,
    Slash,
    /// Any other operator; the text says which.
    Operator,
    /// A character nothing else accepts.
    Unknown,

    // Raw pieces, consumed by the cooker.
    Word,
    LineOpen,
    BlockOpen,
    CommentText,
    BlockClose,
}

impl SqlKind {
    /// Any comment token, cooked.
    pub fn is_comment(self) -> bool {
        matches!(
            self,
            SqlKind::LineComment | SqlKind::BlockComment | SqlKind::DocComment
        )
    }

    /// Kinds that can name a declaration.
    pub fn is_name(self) -> bool {
        matches!(
            self,
            SqlKind::Identifier | SqlKind::QuotedIdentifier | SqlKind::Keyword
        )
    }

    /// Reserved or non-reserved keyword.
    pub fn is_word(self) -> bool {
        matches!(
            self,
            SqlKind::Reserved | SqlKind::Keyword | SqlKind::Identifier
        )
    }
}

impl TokenKind for SqlKind {
    fn trivia(self) -> Trivia {
        match self {
            SqlKind::Whitespace
            | SqlKind::Newline
            | SqlKind::LineComment
            | SqlKind::BlockComment
            | SqlKind::DocComment
            | SqlKind::LineOpen
            | SqlKind::BlockOpen
            | SqlKind::CommentText
            | SqlKind::BlockClose => Trivia::Yes,
            _ => Trivia::No,
        }
    }
}
