//! Recursive-descent doc-comment parser.
//!
//! [`parse_comment`] re-tokenizes a comment with the doc grammar, starting
//! at the comment's own position, and yields one [`Tag`] at a time.
//!
//! A tag marker at the start of a line or after whitespace opens a block
//! tag and ends the content before it. Inside braces only a marker that
//! starts a line does. Leading content before the first block tag is the
//! implicit description.

use std::collections::VecDeque;

use pld_ir::{Name, Position, TextSpan, Token};
use pld_lexer_core::{LexError, Lexer};

use crate::grammar::doc;
use crate::tag::{
    Content, ContentNode, Delimiter, DocExpr, ExprItem, LinkTarget, ParamTag, Reference, Tag,
    TagBody, Visibility,
};
use crate::DocKind;

/// Markers parsed as `@param`.
const PARAM_MARKERS: &[&str] = &["param", "arg", "argument", "field", "property", "prop"];
/// Markers parsed as links.
const LINK_MARKERS: &[&str] = &[
    "see",
    "seealso",
    "link",
    "linkcode",
    "linkplain",
    "include",
    "inheritdoc",
];

/// Parse the doc comment in `token`, which must hold the verbatim comment
/// text including `/**` and `*/`.
pub fn parse_comment<K>(token: &Token<K>) -> Tags<'_> {
    parse_text(&token.text, token.span.start.clone())
}

/// Parse comment text that starts at `start`.
pub fn parse_text(text: &str, start: Position) -> Tags<'_> {
    Tags {
        lexer: Lexer::new(doc(), text).starting_at(start.clone()),
        window: VecDeque::new(),
        error: None,
        exhausted: false,
        finished: false,
        line_start: true,
        after_layout: true,
        depth: 0,
        last_end: start,
        recorders: Vec::new(),
    }
}

/// Where free-form content stops.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Scope {
    /// A block tag: runs to the next block tag marker.
    Block,
    /// Inside `{@tag ...}`: also stops at the closing brace.
    Inline,
}

/// Iterator over the tags of one comment.
///
/// Yields `Ok(tag)` in source order. A lex error is yielded once, after the
/// tags read before it.
pub struct Tags<'s> {
    lexer: Lexer<'static, 's, DocKind>,
    /// Significant and layout tokens; delimiters and decoration are dropped.
    window: VecDeque<Token<DocKind>>,
    error: Option<LexError>,
    exhausted: bool,
    finished: bool,
    /// Nothing but layout since the last newline (or the comment start).
    line_start: bool,
    /// The last consumed token was layout (or nothing was consumed yet).
    after_layout: bool,
    /// Open braces and brackets, inline tags included.
    depth: usize,
    last_end: Position,
    /// Verbatim text of consumed tokens, one buffer per open recording.
    recorders: Vec<String>,
}

impl Tags<'_> {
    // ─── Token window ───────────────────────────────────────────────

    fn fill(&mut self, n: usize) {
        while self.window.len() <= n && !self.exhausted {
            match self.lexer.next() {
                Some(Ok(token)) if token.is_trivia() => {}
                Some(Ok(token)) => self.window.push_back(token),
                Some(Err(error)) => {
                    self.error = Some(error);
                    self.exhausted = true;
                }
                None => self.exhausted = true,
            }
        }
    }

    fn peek(&mut self, n: usize) -> Option<&Token<DocKind>> {
        self.fill(n);
        self.window.get(n)
    }

    fn peek_kind(&mut self, n: usize) -> Option<DocKind> {
        self.peek(n).map(|token| token.kind)
    }

    fn at(&mut self, kind: DocKind) -> bool {
        self.peek_kind(0) == Some(kind)
    }

    fn bump(&mut self) -> Option<Token<DocKind>> {
        self.fill(0);
        let token = self.window.pop_front()?;
        let layout = matches!(token.kind, DocKind::Whitespace | DocKind::Newline);
        match token.kind {
            DocKind::Newline => self.line_start = true,
            DocKind::Whitespace => {}
            _ => self.line_start = false,
        }
        self.after_layout = layout;
        for recorder in &mut self.recorders {
            if layout {
                if !recorder.is_empty() && !recorder.ends_with(' ') {
                    recorder.push(' ');
                }
            } else {
                recorder.push_str(&token.text);
            }
        }
        self.last_end = token.span.end.clone();
        Some(token)
    }

    fn skip_whitespace(&mut self) {
        while self.at(DocKind::Whitespace) {
            self.bump();
        }
    }

    fn skip_layout(&mut self) {
        while matches!(
            self.peek_kind(0),
            Some(DocKind::Whitespace | DocKind::Newline)
        ) {
            self.bump();
        }
    }

    /// True when the next token is a block tag marker.
    fn at_block_tag(&mut self) -> bool {
        let open = self.line_start || (self.after_layout && self.depth == 0);
        open && self.at(DocKind::Tag)
    }

    fn start_recording(&mut self) {
        self.recorders.push(String::new());
    }

    fn finish_recording(&mut self) -> String {
        self.recorders
            .pop()
            .map(|text| text.trim().to_owned())
            .unwrap_or_default()
    }

    fn start_position(&mut self) -> Position {
        match self.peek(0) {
            Some(token) => token.span.start.clone(),
            None => self.last_end.clone(),
        }
    }

    // ─── Tags ───────────────────────────────────────────────────────

    fn description(&mut self) -> Tag {
        let start = self.start_position();
        let content = self.content(Scope::Block);
        Tag {
            marker: String::new(),
            body: TagBody::Description,
            content,
            span: TextSpan::new(start, self.last_end.clone()),
        }
    }

    /// `@marker ...` at the current token.
    fn tag(&mut self, scope: Scope) -> Tag {
        let start = self.start_position();
        let marker = self.bump().map(|token| token.value).unwrap_or_default();
        let body = self.tag_body(&marker);
        let content = self.content(scope);
        tracing::trace!(%marker, "doc tag");
        Tag {
            marker,
            body,
            content,
            span: TextSpan::new(start, self.last_end.clone()),
        }
    }

    fn tag_body(&mut self, marker: &str) -> TagBody {
        match marker {
            m if PARAM_MARKERS.contains(&m) => TagBody::Param(self.param()),
            m if LINK_MARKERS.contains(&m) => self.link(),
            "description" | "desc" => TagBody::Description,
            "return" | "returns" => TagBody::Return {
                type_expr: self.type_constraint(),
            },
            "throws" | "exception" | "raises" => TagBody::Throws {
                name: self.error_name(),
            },
            "public" => TagBody::Visibility(Visibility::Public),
            "private" => TagBody::Visibility(Visibility::Private),
            "protected" => TagBody::Visibility(Visibility::Protected),
            "internal" => TagBody::Visibility(Visibility::Internal),
            "api" => {
                self.skip_whitespace();
                let word = if self.at(DocKind::Identifier) {
                    self.bump()
                        .map(|token| token.text.to_lowercase())
                        .unwrap_or_default()
                } else {
                    String::new()
                };
                TagBody::Visibility(Visibility::Api(word))
            }
            _ => TagBody::Generic,
        }
    }

    /// `{@marker ...}` at the opening brace.
    fn inline_tag(&mut self) -> Tag {
        self.bump();
        self.depth += 1;
        let tag = self.tag(Scope::Inline);
        self.depth -= 1;
        if self.at(DocKind::RBrace) {
            self.bump();
        }
        tag
    }

    /// `[{type}] name [= default]` or `[{type}] [name=default]`.
    fn param(&mut self) -> ParamTag {
        let mut param = ParamTag {
            type_expr: self.type_constraint(),
            ..ParamTag::default()
        };
        self.skip_whitespace();
        match self.peek_kind(0) {
            Some(DocKind::LBracket) => {
                self.bump();
                self.skip_whitespace();
                param.name = self.dotted_name();
                self.skip_whitespace();
                if self.at(DocKind::Equals) {
                    self.bump();
                    self.start_recording();
                    while !matches!(self.peek_kind(0), None | Some(DocKind::RBracket))
                        && !self.at_block_tag()
                    {
                        self.bump();
                    }
                    param.default_value = Some(self.finish_recording());
                }
                if self.at(DocKind::RBracket) {
                    self.bump();
                }
                param.optional = true;
            }
            Some(DocKind::Identifier) => {
                param.name = self.dotted_name();
                if self.peek_kind(0) == Some(DocKind::Whitespace)
                    && self.peek_kind(1) == Some(DocKind::Equals)
                {
                    self.bump();
                }
                if self.at(DocKind::Equals) {
                    self.bump();
                    self.skip_whitespace();
                    param.default_value = Some(self.word());
                }
            }
            _ => {}
        }
        self.skip_dash();
        param
    }

    /// Link target, then the verbatim reference.
    fn link(&mut self) -> TagBody {
        self.skip_whitespace();
        self.start_recording();
        let target = match self.peek_kind(0) {
            Some(DocKind::LBrace) => LinkTarget::Expression(self.expression()),
            Some(DocKind::Url) => {
                let url = self.bump().map(|token| token.text).unwrap_or_default();
                LinkTarget::Url(url)
            }
            Some(DocKind::Hash) if self.peek_kind(1) == Some(DocKind::Identifier) => {
                self.bump();
                LinkTarget::Hash(self.reference())
            }
            Some(DocKind::Identifier) => LinkTarget::Identifier(self.reference()),
            _ => LinkTarget::Missing,
        };
        let reference = self.finish_recording();
        TagBody::Link { target, reference }
    }

    /// `{type}` unless the brace opens an inline tag.
    fn type_constraint(&mut self) -> Option<DocExpr> {
        self.skip_whitespace();
        (self.at(DocKind::LBrace) && self.peek_kind(1) != Some(DocKind::Tag))
            .then(|| self.expression())
    }

    /// Exception name or error code: `NO_DATA_FOUND`, `-20001`, `ORA-01403`.
    fn error_name(&mut self) -> Option<Name> {
        self.skip_whitespace();
        let mut text = String::new();
        while let Some(
            DocKind::Identifier | DocKind::Number | DocKind::Text | DocKind::Dot,
        ) = self.peek_kind(0)
        {
            if let Some(token) = self.bump() {
                text.push_str(&token.text);
            }
        }
        let text = text.trim_end_matches('.');
        (!text.is_empty()).then(|| Name::parse(text))
    }

    // ─── Content ────────────────────────────────────────────────────

    fn content(&mut self, scope: Scope) -> Content {
        let mut content = Content::default();
        while let Some(kind) = self.peek_kind(0) {
            if self.at_block_tag() || (scope == Scope::Inline && kind == DocKind::RBrace) {
                break;
            }
            match kind {
                DocKind::Newline => {
                    self.bump();
                    match scope {
                        Scope::Block => content.push(ContentNode::Newline),
                        Scope::Inline => content.push_text(" "),
                    }
                }
                DocKind::LBrace if self.peek_kind(1) == Some(DocKind::Tag) => {
                    let tag = self.inline_tag();
                    content.push(ContentNode::InlineTag(Box::new(tag)));
                }
                DocKind::LBrace => {
                    let expr = self.expression();
                    content.push(ContentNode::Brace(expr));
                }
                DocKind::LBracket => {
                    let expr = self.expression();
                    content.push(ContentNode::Bracket(expr));
                }
                DocKind::Hash if self.peek_kind(1) == Some(DocKind::Identifier) => {
                    self.bump();
                    let reference = self.reference();
                    content.push(ContentNode::Hash(reference));
                }
                DocKind::String => {
                    if let Some(token) = self.bump() {
                        content.push(ContentNode::Literal(unquote(&token.text)));
                    }
                }
                DocKind::Escape => {
                    if let Some(token) = self.bump() {
                        content.push_text(&token.value);
                    }
                }
                _ => {
                    if let Some(token) = self.bump() {
                        content.push_text(&token.text);
                    }
                }
            }
        }
        content
    }

    /// `{...}` or `[...]` at the opening delimiter. An unclosed expression
    /// ends at a block tag or end of input.
    fn expression(&mut self) -> DocExpr {
        let start = self.start_position();
        let (delimiter, close) = match self.bump().map(|token| token.kind) {
            Some(DocKind::LBracket) => (Delimiter::Bracket, DocKind::RBracket),
            _ => (Delimiter::Brace, DocKind::RBrace),
        };
        self.start_recording();
        self.depth += 1;
        let mut items = Vec::new();
        let mut closed = false;
        while let Some(kind) = self.peek_kind(0) {
            if kind == close {
                closed = true;
                break;
            }
            if self.at_block_tag() {
                break;
            }
            match kind {
                DocKind::Whitespace | DocKind::Newline => {
                    self.bump();
                }
                DocKind::LBrace if self.peek_kind(1) == Some(DocKind::Tag) => {
                    items.push(ExprItem::InlineTag(Box::new(self.inline_tag())));
                }
                DocKind::LBrace | DocKind::LBracket => {
                    items.push(ExprItem::Nested(self.expression()));
                }
                DocKind::Hash if self.peek_kind(1) == Some(DocKind::Identifier) => {
                    self.bump();
                    items.push(ExprItem::Hash(self.reference()));
                }
                DocKind::Identifier => items.push(ExprItem::Reference(self.reference())),
                DocKind::String | DocKind::Number => {
                    if let Some(token) = self.bump() {
                        items.push(ExprItem::Literal(unquote(&token.text)));
                    }
                }
                _ => {
                    if let Some(token) = self.bump() {
                        items.push(ExprItem::Punct(token.value));
                    }
                }
            }
        }
        self.depth -= 1;
        let text = self.finish_recording();
        if closed {
            self.bump();
        }
        DocExpr {
            delimiter,
            items,
            text,
            span: TextSpan::new(start, self.last_end.clone()),
        }
    }

    /// Dotted name with optional invocation arguments, at an identifier.
    fn reference(&mut self) -> Reference {
        self.start_recording();
        let name = self.dotted_name().unwrap_or_default();
        let text = self.finish_recording();
        let args = self.at(DocKind::LParen).then(|| self.arguments());
        Reference { name, text, args }
    }

    fn dotted_name(&mut self) -> Option<Name> {
        if !self.at(DocKind::Identifier) {
            return None;
        }
        let mut text = self.bump().map(|token| token.text).unwrap_or_default();
        while self.peek_kind(0) == Some(DocKind::Dot)
            && self.peek_kind(1) == Some(DocKind::Identifier)
        {
            for _ in 0..2 {
                if let Some(token) = self.bump() {
                    text.push_str(&token.text);
                }
            }
        }
        Some(Name::parse(&text))
    }

    /// `(a, b)`: arguments split at top-level commas, verbatim and trimmed.
    fn arguments(&mut self) -> Vec<String> {
        self.bump();
        let mut args = Vec::new();
        let mut depth = 0usize;
        self.start_recording();
        while let Some(kind) = self.peek_kind(0) {
            if self.at_block_tag() {
                break;
            }
            match kind {
                DocKind::RParen if depth == 0 => break,
                DocKind::Comma if depth == 0 => {
                    args.push(self.finish_recording());
                    self.bump();
                    self.start_recording();
                    continue;
                }
                DocKind::LParen => depth += 1,
                DocKind::RParen => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        let last = self.finish_recording();
        if !last.is_empty() || !args.is_empty() {
            args.push(last);
        }
        if self.at(DocKind::RParen) {
            self.bump();
        }
        args
    }

    /// A run of tokens up to the next layout token.
    fn word(&mut self) -> String {
        let mut text = String::new();
        while !matches!(
            self.peek_kind(0),
            None | Some(DocKind::Whitespace | DocKind::Newline)
        ) {
            if let Some(token) = self.bump() {
                text.push_str(&token.text);
            }
        }
        text
    }

    /// Optional `-` between a parameter name and its description.
    fn skip_dash(&mut self) {
        self.skip_whitespace();
        let dash = self
            .peek(0)
            .is_some_and(|token| token.kind == DocKind::Text && token.text.chars().all(|c| c == '-'));
        if dash {
            self.bump();
        }
    }
}

fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(open @ ('"' | '\'')), Some(close)) if open == close => chars.as_str().to_owned(),
        _ => text.to_owned(),
    }
}

impl Iterator for Tags<'_> {
    type Item = Result<Tag, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_layout();
        match self.peek_kind(0) {
            None => {
                self.finished = true;
                self.error.take().map(Err)
            }
            Some(DocKind::Tag) => Some(Ok(self.tag(Scope::Block))),
            Some(_) => Some(Ok(self.description())),
        }
    }
}

impl std::iter::FusedIterator for Tags<'_> {}

#[cfg(test)]
mod tests;
