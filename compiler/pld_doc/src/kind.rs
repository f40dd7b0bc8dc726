use pld_ir::{TokenKind, Trivia};

/// Token kinds of the doc-comment grammar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DocKind {
    /// `/**`
    CommentStart,
    /// `*/`
    CommentEnd,
    /// Leading `*`s of a continuation line.
    Decoration,

    Newline,
    Whitespace,

    /// `@name`; value is the lowercased name without `@`.
    Tag,
    Url,
    Identifier,
    Number,
    /// Quoted string, inside braces and brackets only.
    String,
    /// Anything else.
    Text,
    /// `\@`, `\{`, ...; value is the escaped character.
    Escape,

    Hash,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Equals,
    Comma,
    Dot,
    Pipe,
    Colon,
}

impl TokenKind for DocKind {
    fn trivia(self) -> Trivia {
        match self {
            DocKind::CommentStart | DocKind::CommentEnd | DocKind::Decoration => Trivia::Yes,
            // Layout matters in free text, not inside `{...}` or `[...]`.
            DocKind::Newline | DocKind::Whitespace => Trivia::Structured,
            _ => Trivia::No,
        }
    }
}
