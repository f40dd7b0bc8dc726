//! Tokens and token groups.
//!
//! A [`Token`] is generic over its grammar's kind enum. The lexer engine
//! decides trivia per kind through [`TokenKind::trivia`], so each grammar
//! owns its own classification.

use std::fmt;

use crate::{Position, TextSpan};

/// Whether a token carries grammatical weight.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Trivia {
    /// Significant token.
    #[default]
    No,
    /// Whitespace, comments, decoration.
    Yes,
    /// Trivia inside a structured (brace/bracket) sub-grammar, content
    /// everywhere else.
    Structured,
}

/// A grammar's token kind.
pub trait TokenKind: Copy + Eq + fmt::Debug {
    /// Trivia classification for tokens of this kind.
    fn trivia(self) -> Trivia;
}

/// A classified, position-decorated slice of source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token<K> {
    /// Verbatim source slice.
    pub text: String,
    /// Normalized form (uppercased keyword, unquoted string, ...).
    pub value: String,
    pub kind: K,
    pub trivia: Trivia,
    pub span: TextSpan,
}

impl<K: TokenKind> Token<K> {
    /// Create a token whose value equals its text and whose trivia comes
    /// from the kind.
    pub fn new(kind: K, text: impl Into<String>, span: TextSpan) -> Self {
        let text = text.into();
        Token {
            value: text.clone(),
            text,
            kind,
            trivia: kind.trivia(),
            span,
        }
    }

    /// Replace the normalized value.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

impl<K> Token<K> {
    /// True for plain trivia (never significant).
    #[inline]
    pub fn is_trivia(&self) -> bool {
        self.trivia == Trivia::Yes
    }

    /// True for trivia only inside structured sub-grammars.
    #[inline]
    pub fn is_structured_trivia(&self) -> bool {
        self.trivia == Trivia::Structured
    }

    /// Start position.
    #[inline]
    pub fn start(&self) -> &Position {
        &self.span.start
    }
}

/// A run of trivia followed by the next significant token.
///
/// Never empty. At end of input a group may hold trivia only; its key token
/// is then the first token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenGroup<K> {
    tokens: Vec<Token<K>>,
    key: usize,
}

impl<K> TokenGroup<K> {
    /// Build a group. Returns `None` for an empty token list.
    pub fn new(tokens: Vec<Token<K>>) -> Option<Self> {
        if tokens.is_empty() {
            return None;
        }
        let key = tokens
            .iter()
            .position(|token| token.trivia == Trivia::No)
            .unwrap_or(0);
        Some(TokenGroup { tokens, key })
    }

    /// The first significant token, or the first token if all are trivia.
    #[inline]
    pub fn key(&self) -> &Token<K> {
        &self.tokens[self.key]
    }

    /// True if the group holds trivia only.
    pub fn is_trivia_only(&self) -> bool {
        self.tokens[self.key].trivia != Trivia::No
    }

    /// Trivia before the key token.
    pub fn leading_trivia(&self) -> &[Token<K>] {
        if self.is_trivia_only() {
            &self.tokens
        } else {
            &self.tokens[..self.key]
        }
    }

    /// All tokens, in source order.
    pub fn tokens(&self) -> &[Token<K>] {
        &self.tokens
    }

    /// Combined span of every token in the group.
    pub fn span(&self) -> TextSpan {
        let first = &self.tokens[0].span;
        let last = &self.tokens[self.tokens.len() - 1].span;
        TextSpan::new(first.start.clone(), last.end.clone())
    }

    /// Span of the key token alone.
    pub fn key_span(&self) -> &TextSpan {
        &self.key().span
    }

    /// Verbatim text of the whole group.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|token| token.text.as_str()).collect()
    }

    /// Verbatim text from the key token on (leading trivia dropped).
    pub fn text_from_key(&self) -> String {
        if self.is_trivia_only() {
            return String::new();
        }
        self.tokens[self.key..]
            .iter()
            .map(|token| token.text.as_str())
            .collect()
    }

    pub fn into_tokens(self) -> Vec<Token<K>> {
        self.tokens
    }
}
