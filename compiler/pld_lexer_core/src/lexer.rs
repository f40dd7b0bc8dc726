//! The grammar-driven tokenizer.

use std::sync::Arc;

use pld_ir::{Position, TextSpan, Token, TokenKind};

use crate::grammar::{Fallback, Grammar, State, StateId, Transition};
use crate::LexError;

/// One level of the state stack.
#[derive(Clone, Debug)]
struct Frame {
    state: StateId,
    /// Start of the token that entered this state.
    entered_at: Position,
}

/// Lazily tokenizes one source text with a [`Grammar`].
///
/// Yields `Ok(token)` until input is exhausted. A fatal error is yielded
/// once as `Err`, after which the iterator is fused.
///
/// Every yielded token covers at least one character, so concatenating all
/// token texts reproduces the consumed input.
pub struct Lexer<'g, 's, K> {
    grammar: &'g Grammar<K>,
    source: &'s str,
    offset: usize,
    position: Position,
    stack: Vec<Frame>,
    finished: bool,
}

impl<'g, 's, K: TokenKind> Lexer<'g, 's, K> {
    pub fn new(grammar: &'g Grammar<K>, source: &'s str) -> Self {
        let position = Position::start();
        Lexer {
            grammar,
            source,
            offset: 0,
            stack: vec![Frame {
                state: grammar.start(),
                entered_at: position.clone(),
            }],
            position,
            finished: false,
        }
    }

    /// Attach a filename to every emitted position.
    #[must_use]
    pub fn with_filename(mut self, filename: Option<Arc<str>>) -> Self {
        self.position = self.position.with_filename(filename.clone());
        for frame in &mut self.stack {
            frame.entered_at = frame.entered_at.clone().with_filename(filename.clone());
        }
        self
    }

    /// Start counting from `position` instead of 1:1. Used when the text is
    /// a slice of a larger file (e.g., the body of a comment).
    #[must_use]
    pub fn starting_at(mut self, position: Position) -> Self {
        for frame in &mut self.stack {
            frame.entered_at = position.clone();
        }
        self.position = position;
        self
    }

    /// Name of the state currently on top of the stack.
    pub fn current_state(&self) -> &'static str {
        self.grammar.state_name(self.top().state)
    }

    /// Position of the next character to be read.
    pub fn position(&self) -> &Position {
        &self.position
    }

    fn top(&self) -> &Frame {
        // The bottom frame is never popped.
        &self.stack[self.stack.len() - 1]
    }

    fn top_state(&self) -> &'g State<K> {
        self.grammar.state(self.top().state)
    }

    /// End of input: report the innermost state that needed closing.
    fn at_end(&mut self) -> Option<Result<Token<K>, LexError>> {
        self.finished = true;
        let grammar = self.grammar;
        self.stack.iter().rev().find_map(|frame| {
            grammar.state(frame.state).must_close.map(|label| {
                Err(LexError::Unterminated {
                    state: label,
                    at: frame.entered_at.clone(),
                })
            })
        })
    }

    fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    fn apply(&mut self, transition: Transition, start: &Position) {
        match transition {
            Transition::Stay => {}
            Transition::Push(state) => self.stack.push(Frame {
                state,
                entered_at: start.clone(),
            }),
            Transition::Pop => self.pop(),
            Transition::Next(state) => {
                let last = self.stack.len() - 1;
                self.stack[last] = Frame {
                    state,
                    entered_at: start.clone(),
                };
            }
        }
    }

    /// Consume `len` bytes as a token.
    fn emit(&mut self, kind: K, len: usize, value: Option<String>) -> Token<K> {
        let text = &self.source[self.offset..self.offset + len];
        let start = self.position.clone();
        let end = start.advanced_by(text);
        let mut token = Token::new(kind, text, TextSpan::new(start, end.clone()));
        if let Some(value) = value {
            token.value = value;
        }
        self.offset += len;
        self.position = end;
        token
    }
}

impl<K: TokenKind> Iterator for Lexer<'_, '_, K> {
    type Item = Result<Token<K>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        // Zero-width fallbacks in a row. Each one visits a state; visiting
        // more states than exist means a cycle.
        let mut epsilon_steps = 0usize;

        let source = self.source;
        loop {
            let rest = &source[self.offset..];
            let Some(found) = rest.chars().next() else {
                return self.at_end();
            };
            let state = self.top_state();

            if let Some((rule, len)) = state
                .rules
                .iter()
                .find_map(|rule| rule.match_len(rest).map(|len| (rule, len)))
            {
                let start = self.position.clone();
                let value = rule.value_of(&rest[..len]);
                let token = self.emit(rule.kind, len, Some(value));
                self.apply(rule.transition, &start);
                return Some(Ok(token));
            }

            match state.fallback {
                Fallback::Error => {
                    self.finished = true;
                    return Some(Err(LexError::UnexpectedChar {
                        found,
                        state: state.name,
                        at: self.position.clone(),
                    }));
                }
                Fallback::Token(kind) => {
                    return Some(Ok(self.emit(kind, found.len_utf8(), None)));
                }
                Fallback::Pop => self.pop(),
                Fallback::Next(next) => {
                    let at = self.position.clone();
                    self.apply(Transition::Next(next), &at);
                }
            }

            epsilon_steps += 1;
            if epsilon_steps > self.grammar.state_count() {
                self.finished = true;
                return Some(Err(LexError::Stalled {
                    state: self.current_state(),
                    at: self.position.clone(),
                }));
            }
        }
    }
}

impl<K: TokenKind> std::iter::FusedIterator for Lexer<'_, '_, K> {}

#[cfg(test)]
mod tests;
