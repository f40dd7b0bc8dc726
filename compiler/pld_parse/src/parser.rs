//! Parser state and token-level helpers.
//!
//! Grammar rules live in `grammar/` as further `impl Parser` blocks; this
//! file holds the lookahead, consumption and node-building primitives they
//! share.

use pld_ir::{Name, Position};
use pld_lexer::{LexError, SqlKind, SqlToken};

use crate::stream::TokenStream;
use crate::tree::{NodeId, NodeKind, SyntaxTree, TreeBuilder};
use crate::SyntaxError;

/// Recursive-descent parser over a cooked token iterator.
pub struct Parser<I> {
    stream: TokenStream<I>,
    tree: TreeBuilder,
    /// End of the last consumed group; where end-of-input errors point.
    end: Position,
    /// Groups consumed since the start of the file.
    consumed: usize,
}

impl<I> Parser<I>
where
    I: Iterator<Item = Result<SqlToken, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        Parser {
            stream: TokenStream::new(tokens),
            tree: TreeBuilder::default(),
            end: Position::start(),
            consumed: 0,
        }
    }

    pub(crate) fn take_lex_error(&mut self) -> Option<LexError> {
        self.stream.take_error()
    }

    /// Drop a trailing trivia-only group at end of input.
    pub(crate) fn skip_trailing_trivia(&mut self) {
        if self.stream.at_end() {
            while self.stream.next_group().is_some() {}
        }
    }

    // ─── Lookahead ──────────────────────────────────────────────────

    #[inline]
    pub(crate) fn key(&mut self, n: usize) -> Option<&SqlToken> {
        self.stream.peek_key(n)
    }

    pub(crate) fn kind_at(&mut self, n: usize) -> Option<SqlKind> {
        self.key(n).map(|token| token.kind)
    }

    #[inline]
    pub(crate) fn at_end(&mut self) -> bool {
        self.stream.at_end()
    }

    pub(crate) fn at_kind(&mut self, n: usize, kind: SqlKind) -> bool {
        self.kind_at(n) == Some(kind)
    }

    /// Unquoted word (keyword or identifier) with the given uppercase value.
    pub(crate) fn at_word(&mut self, n: usize, word: &str) -> bool {
        self.key(n)
            .is_some_and(|token| token.kind.is_word() && token.value == word)
    }

    pub(crate) fn at_any_word(&mut self, n: usize, words: &[&str]) -> bool {
        self.key(n)
            .is_some_and(|token| token.kind.is_word() && words.contains(&token.value.as_str()))
    }

    /// A token that can name a declaration.
    pub(crate) fn at_name(&mut self, n: usize) -> bool {
        self.kind_at(n).is_some_and(SqlKind::is_name)
    }

    /// Operator token with the given text.
    pub(crate) fn at_op(&mut self, n: usize, op: &str) -> bool {
        self.key(n)
            .is_some_and(|token| token.kind == SqlKind::Operator && token.text == op)
    }

    /// The `n`th group begins a new line.
    pub(crate) fn starts_line(&mut self, n: usize) -> bool {
        if self.consumed + n == 0 {
            return true;
        }
        self.stream.peek(n).is_some_and(|group| {
            group
                .leading_trivia()
                .iter()
                .any(|token| token.kind == SqlKind::Newline)
        })
    }

    /// A `/` alone on its line: the SQL*Plus statement terminator.
    pub(crate) fn at_terminator(&mut self, n: usize) -> bool {
        self.at_kind(n, SqlKind::Slash)
            && self.starts_line(n)
            && (self.key(n + 1).is_none() || self.starts_line(n + 1))
    }

    /// `CREATE` at the start of a line. Opaque bodies stop here when a
    /// script omits the `/` terminator.
    pub(crate) fn at_create(&mut self, n: usize) -> bool {
        self.at_word(n, "CREATE") && self.starts_line(n)
    }

    // ─── Consumption ────────────────────────────────────────────────

    /// Move the next group into the tree being built.
    pub(crate) fn bump(&mut self) {
        if let Some(group) = self.stream.next_group() {
            self.end = group.span().end;
            self.consumed += 1;
            self.tree.push_group(group);
        }
    }

    pub(crate) fn eat_word(&mut self, word: &str) -> bool {
        let found = self.at_word(0, word);
        if found {
            self.bump();
        }
        found
    }

    pub(crate) fn eat_kind(&mut self, kind: SqlKind) -> bool {
        let found = self.at_kind(0, kind);
        if found {
            self.bump();
        }
        found
    }

    pub(crate) fn expect_word(&mut self, word: &str) -> Result<(), SyntaxError> {
        if self.eat_word(word) {
            Ok(())
        } else {
            Err(self.error(format!("`{word}`")))
        }
    }

    pub(crate) fn expect_kind(&mut self, kind: SqlKind, what: &str) -> Result<(), SyntaxError> {
        if self.eat_kind(kind) {
            Ok(())
        } else {
            Err(self.error(what))
        }
    }

    /// Error for a missing `expected` at the next token.
    pub(crate) fn error(&mut self, expected: impl Into<String>) -> SyntaxError {
        let end = self.end.clone();
        SyntaxError::new(expected, self.stream.peek_key(0), end)
    }

    /// Consume a `(...)` group with nested parentheses, if one is next.
    pub(crate) fn skip_parens(&mut self) {
        if !self.at_kind(0, SqlKind::LParen) {
            return;
        }
        let mut depth = 0usize;
        while let Some(kind) = self.kind_at(0) {
            match kind {
                SqlKind::LParen => depth += 1,
                SqlKind::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.bump();
            if depth == 0 {
                break;
            }
        }
    }

    /// Consume groups until `stop` holds at parenthesis depth zero. The
    /// stopping token is not consumed. Never crosses a `/` terminator.
    pub(crate) fn skip_until(&mut self, stop: impl Fn(&SqlToken) -> bool) {
        let mut depth = 0usize;
        loop {
            if self.at_terminator(0) {
                return;
            }
            let Some(token) = self.key(0) else {
                return;
            };
            if depth == 0 && stop(token) {
                return;
            }
            match token.kind {
                SqlKind::LParen => depth += 1,
                SqlKind::RParen => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Consume through the next `;` at depth zero (inclusive).
    pub(crate) fn skip_statement(&mut self) {
        self.skip_until(|token| token.kind == SqlKind::Semicolon);
        self.eat_kind(SqlKind::Semicolon);
    }

    /// Consume everything up to a `/` terminator, a `CREATE` at line
    /// start, or end of input.
    pub(crate) fn skip_to_terminator(&mut self) {
        while !self.at_end() && !self.at_terminator(0) && !self.at_create(0) {
            self.bump();
        }
    }

    /// Consume the rest of the current line.
    pub(crate) fn skip_line(&mut self) {
        self.bump();
        while !self.at_end() && !self.starts_line(0) {
            self.bump();
        }
    }

    // ─── Names ──────────────────────────────────────────────────────

    /// A dotted, normalized name: `a`, `schema.pkg`, `"Mixed".x`.
    pub(crate) fn name(&mut self) -> Result<Name, SyntaxError> {
        if !self.at_name(0) {
            return Err(self.error("a name"));
        }
        let mut name = Name::default();
        loop {
            if let Some(token) = self.key(0) {
                name.push(token.value.clone());
            }
            self.bump();
            if self.at_kind(0, SqlKind::Dot) && self.at_name(1) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    /// A name wrapped in an `Identifier` node.
    pub(crate) fn identifier(&mut self) -> Result<Name, SyntaxError> {
        let id = self.start(NodeKind::Identifier);
        let name = self.name();
        if let Ok(name) = &name {
            self.tree.set_name(id, name.clone());
        }
        self.finish();
        name
    }

    // ─── Tree building ──────────────────────────────────────────────

    pub(crate) fn start(&mut self, kind: NodeKind) -> NodeId {
        self.tree.start(kind)
    }

    pub(crate) fn finish(&mut self) {
        self.tree.finish();
    }

    /// Open a node, run `body`, close the node even on error.
    pub(crate) fn node(
        &mut self,
        kind: NodeKind,
        body: impl FnOnce(&mut Self, NodeId) -> Result<(), SyntaxError>,
    ) -> Result<NodeId, SyntaxError> {
        let id = self.start(kind);
        let result = body(self, id);
        self.finish();
        result.map(|()| id)
    }

    /// A node holding exactly the next group.
    pub(crate) fn leaf(&mut self, kind: NodeKind) -> NodeId {
        let id = self.start(kind);
        self.bump();
        self.finish();
        id
    }

    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.tree.set_kind(id, kind);
    }

    pub(crate) fn set_name(&mut self, id: NodeId, name: Name) {
        self.tree.set_name(id, name);
    }

    /// Hand over the finished statement and start a fresh tree.
    pub(crate) fn take_tree(&mut self) -> Option<SyntaxTree> {
        let tree = std::mem::take(&mut self.tree);
        if tree.is_empty() {
            None
        } else {
            Some(tree.build())
        }
    }
}
