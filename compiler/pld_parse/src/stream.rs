//! Token groups with a bounded lookahead window.
//!
//! The stream pulls cooked tokens from the lexer only when the parser asks
//! for them. Each [`SqlGroup`] is a run of trivia followed by one
//! significant token; `peek(n)` is an index into the buffered window, so
//! looking ahead never re-reads or re-lexes anything.

use std::collections::VecDeque;

use pld_lexer::{LexError, SqlGroup, SqlToken};
use pld_ir::{Token, TokenGroup};

/// Groups cooked tokens for the parser.
pub struct TokenStream<I> {
    tokens: I,
    window: VecDeque<SqlGroup>,
    /// Lex error met while filling the window; reported once the parser
    /// has used up the groups before it.
    error: Option<LexError>,
    exhausted: bool,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        TokenStream {
            tokens,
            window: VecDeque::new(),
            error: None,
            exhausted: false,
        }
    }

    /// Buffer groups until index `n` exists or input ends.
    fn fill(&mut self, n: usize) {
        while self.window.len() <= n && !self.exhausted {
            let mut pending: Vec<SqlToken> = Vec::new();
            loop {
                match self.tokens.next() {
                    Some(Ok(token)) => {
                        let significant = is_significant(&token);
                        pending.push(token);
                        if significant {
                            break;
                        }
                    }
                    Some(Err(err)) => {
                        self.error = Some(err);
                        self.exhausted = true;
                        break;
                    }
                    None => {
                        self.exhausted = true;
                        break;
                    }
                }
            }
            if let Some(group) = TokenGroup::new(pending) {
                self.window.push_back(group);
            }
        }
    }

    /// The `n`th group ahead, `0` being the next one.
    pub fn peek(&mut self, n: usize) -> Option<&SqlGroup> {
        self.fill(n);
        self.window.get(n)
    }

    /// The significant token of the `n`th group ahead. `None` at end of
    /// input, including a trailing trivia-only group.
    pub fn peek_key(&mut self, n: usize) -> Option<&SqlToken> {
        self.peek(n)
            .filter(|group| !group.is_trivia_only())
            .map(TokenGroup::key)
    }

    /// Take the next group.
    pub fn next_group(&mut self) -> Option<SqlGroup> {
        self.fill(0);
        self.window.pop_front()
    }

    /// True when no significant token remains.
    pub fn at_end(&mut self) -> bool {
        self.peek_key(0).is_none()
    }

    /// Number of groups currently buffered.
    pub fn buffered(&self) -> usize {
        self.window.len()
    }

    /// The deferred lex error, if any. Only taken once.
    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }
}

fn is_significant<K>(token: &Token<K>) -> bool {
    token.trivia == pld_ir::Trivia::No
}
