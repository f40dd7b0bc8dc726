//! The doc-comment tag model.
//!
//! A comment parses into a flat list of [`Tag`]s. Each tag carries its
//! kind-specific fields in [`TagBody`] and free-form [`Content`], which in
//! turn may hold brace and bracket expressions ([`DocExpr`]), `#member`
//! references and inline tags such as `{@link target text}`.

use std::fmt::Write;

use pld_ir::{Name, TextSpan};

/// One `@tag ...` unit, or the untagged description.
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    /// Marker as written, lowercased and without `@`. Empty for the
    /// implicit description.
    pub marker: String,
    pub body: TagBody,
    pub content: Content,
    pub span: TextSpan,
}

impl Tag {
    /// Stable kind string for renderers: `description`, `param`, `return`,
    /// `link`, `throws`, `visibility`, or the marker of a generic tag.
    pub fn kind(&self) -> &str {
        match &self.body {
            TagBody::Description => "description",
            TagBody::Param(_) => "param",
            TagBody::Return { .. } => "return",
            TagBody::Link { .. } => "link",
            TagBody::Throws { .. } => "throws",
            TagBody::Visibility(_) => "visibility",
            TagBody::Generic => &self.marker,
        }
    }

    /// Name a `@param` or `@throws` tag refers to.
    pub fn name(&self) -> Option<&Name> {
        match &self.body {
            TagBody::Param(param) => param.name.as_ref(),
            TagBody::Throws { name } => name.as_ref(),
            _ => None,
        }
    }

    /// Brace type of a `@param` or `@return` tag.
    pub fn type_expr(&self) -> Option<&DocExpr> {
        match &self.body {
            TagBody::Param(param) => param.type_expr.as_ref(),
            TagBody::Return { type_expr } => type_expr.as_ref(),
            _ => None,
        }
    }

    pub fn target(&self) -> Option<&LinkTarget> {
        match &self.body {
            TagBody::Link { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Text shown for a link: its content, or the reference as written
    /// when there is none.
    pub fn display_text(&self) -> String {
        let text = self.content.text();
        match &self.body {
            TagBody::Link { reference, .. } if text.is_empty() => reference.clone(),
            _ => text,
        }
    }

    pub fn is_description(&self) -> bool {
        matches!(self.body, TagBody::Description)
    }
}

/// Kind-specific fields of a [`Tag`].
#[derive(Clone, Debug, PartialEq)]
pub enum TagBody {
    Description,
    Param(ParamTag),
    Return {
        type_expr: Option<DocExpr>,
    },
    Link {
        target: LinkTarget,
        /// The target exactly as written (`#other`, `pkg.proc(1)`).
        reference: String,
    },
    Throws {
        name: Option<Name>,
    },
    Visibility(Visibility),
    /// Any other marker: `@deprecated`, `@since`, `@example`, ...
    Generic,
}

/// `@param [{type}] name [= default]` or `@param [{type}] [name=default]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamTag {
    pub name: Option<Name>,
    pub type_expr: Option<DocExpr>,
    pub default_value: Option<String>,
    /// Written in the bracket form.
    pub optional: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    /// `@api <word>`
    Api(String),
}

impl Visibility {
    /// Hidden from public documentation.
    pub fn is_hidden(&self) -> bool {
        match self {
            Visibility::Private | Visibility::Internal => true,
            Visibility::Api(word) => matches!(word.as_str(), "private" | "internal"),
            Visibility::Public | Visibility::Protected => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Protected => "protected",
            Visibility::Internal => "internal",
            Visibility::Api(word) => word,
        }
    }
}

/// What a link tag points at.
#[derive(Clone, Debug, PartialEq)]
pub enum LinkTarget {
    Url(String),
    /// `#member`
    Hash(Reference),
    /// `pkg.proc` or `pkg.proc(args)`
    Identifier(Reference),
    /// `{...}`
    Expression(DocExpr),
    Missing,
}

/// A (possibly dotted) name as written in a comment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Normalized like a PL/SQL identifier.
    pub name: Name,
    /// Verbatim text of the name.
    pub text: String,
    /// Invocation arguments, verbatim and trimmed, if written as a call.
    pub args: Option<Vec<String>>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Delimiter {
    Brace,
    Bracket,
}

/// A `{...}` or `[...]` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct DocExpr {
    pub delimiter: Delimiter,
    pub items: Vec<ExprItem>,
    /// Inner text without delimiters, decoration or edge whitespace.
    pub text: String,
    pub span: TextSpan,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprItem {
    InlineTag(Box<Tag>),
    Reference(Reference),
    Hash(Reference),
    /// Number or quoted string, unquoted.
    Literal(String),
    Nested(DocExpr),
    /// Operators and anything else: `|`, `:`, `=`, ...
    Punct(String),
}

/// Free-form text of a tag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Content {
    pub nodes: Vec<ContentNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ContentNode {
    Text(String),
    Newline,
    Brace(DocExpr),
    Bracket(DocExpr),
    Hash(Reference),
    InlineTag(Box<Tag>),
    Literal(String),
}

impl Content {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append text, merging with a preceding text node.
    pub(crate) fn push_text(&mut self, text: &str) {
        if let Some(ContentNode::Text(last)) = self.nodes.last_mut() {
            last.push_str(text);
        } else {
            self.nodes.push(ContentNode::Text(text.to_owned()));
        }
    }

    pub(crate) fn push(&mut self, node: ContentNode) {
        self.nodes.push(node);
    }

    /// Plain text: lines trimmed, blank lines at either end dropped, inline
    /// tags rendered as their display text.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        for node in &self.nodes {
            match node {
                ContentNode::Text(text) | ContentNode::Literal(text) => raw.push_str(text),
                ContentNode::Newline => raw.push('\n'),
                ContentNode::Brace(expr) => {
                    let _ = write!(raw, "{{{}}}", expr.text);
                }
                ContentNode::Bracket(expr) => {
                    let _ = write!(raw, "[{}]", expr.text);
                }
                ContentNode::Hash(reference) => {
                    raw.push('#');
                    raw.push_str(&reference.text);
                }
                ContentNode::InlineTag(tag) => raw.push_str(&tag.display_text()),
            }
        }

        let lines: Vec<&str> = raw.lines().map(str::trim).collect();
        let first = lines.iter().position(|line| !line.is_empty());
        let last = lines.iter().rposition(|line| !line.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => lines[first..=last].join("\n"),
            _ => String::new(),
        }
    }

    /// Inline tags anywhere in the content, in order.
    pub fn inline_tags(&self) -> impl Iterator<Item = &Tag> {
        self.nodes.iter().filter_map(|node| match node {
            ContentNode::InlineTag(tag) => Some(tag.as_ref()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests;
