//! Syntax trees.
//!
//! One [`SyntaxTree`] per top-level statement. Nodes live in an arena and
//! refer to each other by [`NodeId`]; each node covers a contiguous range
//! of the statement's token groups, so text and spans are always derived
//! from the source tokens rather than stored twice.

use std::fmt;
use std::ops::Range;

use pld_ir::{Name, TextSpan};
use pld_lexer::{SqlGroup, SqlKind, SqlToken};

/// Index of a node in its tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The statement node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of `CREATE` statement.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnitKind {
    Package,
    PackageBody,
    ObjectType,
    TypeBody,
    Procedure,
    Function,
}

impl UnitKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UnitKind::Package => "package",
            UnitKind::PackageBody => "package body",
            UnitKind::ObjectType => "type",
            UnitKind::TypeBody => "type body",
            UnitKind::Procedure => "procedure",
            UnitKind::Function => "function",
        }
    }
}

/// Shape of a `TYPE` declaration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeDeclKind {
    Record,
    NestedTable,
    AssociativeArray,
    Varray,
    RefCursor,
    Other,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MethodKind {
    Procedure,
    Function,
    Constructor,
    Cursor,
}

/// Parameter passing mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ParamMode {
    #[default]
    In,
    Out,
    InOut,
}

impl ParamMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamMode::In => "IN",
            ParamMode::Out => "OUT",
            ParamMode::InOut => "IN OUT",
        }
    }
}

/// What a node is.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NodeKind {
    // Statements and declarations
    CreateUnit(UnitKind),
    Variable { constant: bool },
    Exception,
    Subtype,
    TypeDecl(TypeDeclKind),
    Method(MethodKind),
    /// Object type attribute.
    Attribute,
    /// Record field.
    Field,
    Pragma,
    Parameter(ParamMode),
    ParameterList,
    Return,
    /// `/` or a stray `;`.
    Terminator,
    SqlPlus,
    /// Recognised as a statement but not understood.
    Unhandled,
    /// Opaque implementation text.
    Body,

    // Generic pieces
    Identifier,
    TypeExpr,
    Expression,
    Literal,
    Keyword,
    Modifier,
}

impl NodeKind {
    /// Members of a unit, as opposed to pieces of its header.
    pub fn is_member(self) -> bool {
        matches!(
            self,
            NodeKind::Variable { .. }
                | NodeKind::Exception
                | NodeKind::Subtype
                | NodeKind::TypeDecl(_)
                | NodeKind::Method(_)
                | NodeKind::Attribute
                | NodeKind::Pragma
                | NodeKind::Unhandled
                | NodeKind::Body
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::CreateUnit(kind) => write!(f, "create {}", kind.as_str()),
            NodeKind::Variable { constant: true } => write!(f, "constant"),
            NodeKind::Variable { constant: false } => write!(f, "variable"),
            NodeKind::Parameter(_) => write!(f, "parameter"),
            NodeKind::TypeDecl(_) => write!(f, "type"),
            NodeKind::Method(kind) => write!(f, "{kind:?}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// One node of a [`SyntaxTree`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Token groups covered, indices into [`SyntaxTree::groups`].
    pub groups: Range<usize>,
    /// Normalized name for named nodes (declarations, identifiers,
    /// modifiers).
    pub name: Option<Name>,
}

/// Syntax tree of one top-level statement.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    groups: Vec<SqlGroup>,
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn name(&self, id: NodeId) -> Option<&Name> {
        self.node(id).name.as_ref()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// First child of the given kind.
    pub fn child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&child| self.kind(child) == kind)
    }

    /// Children matching a predicate, in order.
    pub fn children_where<'a>(
        &'a self,
        id: NodeId,
        predicate: impl Fn(NodeKind) -> bool + 'a,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| predicate(self.kind(child)))
    }

    /// Every node id, parents before children.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "node count is bounded by TreeBuilder::start"
    )]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(|index| NodeId(index as u32))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All token groups of the statement.
    pub fn all_groups(&self) -> &[SqlGroup] {
        &self.groups
    }

    /// Token groups covered by a node.
    pub fn groups(&self, id: NodeId) -> &[SqlGroup] {
        &self.groups[self.node(id).groups.clone()]
    }

    /// Significant tokens of a node, in order.
    pub fn keys(&self, id: NodeId) -> impl Iterator<Item = &SqlToken> {
        self.groups(id)
            .iter()
            .filter(|group| !group.is_trivia_only())
            .map(pld_ir::TokenGroup::key)
    }

    /// Normalized values of a node's significant tokens.
    pub fn words(&self, id: NodeId) -> Vec<&str> {
        self.keys(id).map(|token| token.value.as_str()).collect()
    }

    /// The trivia before a node's first significant token.
    pub fn leading_trivia(&self, id: NodeId) -> &[SqlToken] {
        self.groups(id)
            .first()
            .map(|group| group.leading_trivia())
            .unwrap_or_default()
    }

    /// Doc comments directly attached to a node, in source order.
    pub fn doc_comments(&self, id: NodeId) -> impl Iterator<Item = &SqlToken> {
        self.leading_trivia(id)
            .iter()
            .filter(|token| token.kind == SqlKind::DocComment)
    }

    /// Span from the node's first significant token to its end.
    pub fn span(&self, id: NodeId) -> Option<TextSpan> {
        let groups = self.groups(id);
        let first = groups.first()?;
        let last = groups.last()?;
        Some(TextSpan::new(
            first.key_span().start.clone(),
            last.span().end,
        ))
    }

    /// Verbatim source of a node, without its leading trivia.
    pub fn text(&self, id: NodeId) -> String {
        let groups = self.groups(id);
        let mut text = String::new();
        if let Some((first, rest)) = groups.split_first() {
            text.push_str(&first.text_from_key());
            for group in rest {
                text.push_str(&group.text());
            }
        }
        text
    }

    /// Source text with runs of whitespace and line breaks collapsed to one
    /// space and comments dropped. Used for type and default strings.
    pub fn flat_text(&self, id: NodeId) -> String {
        flatten(self.groups(id))
    }

    /// Flattened text after the node's first significant token with value
    /// `word`, e.g. the definition after `IS` in a type declaration.
    pub fn flat_text_after(&self, id: NodeId, word: &str) -> Option<String> {
        let groups = self.groups(id);
        let at = groups
            .iter()
            .position(|group| !group.is_trivia_only() && group.key().value == word)?;
        Some(flatten(&groups[at + 1..]))
    }

    /// The declaration text shown to readers: for units, everything up to
    /// the first member; for other nodes, the whole node. Trailing `;` and
    /// an opening `(` of a member list are dropped.
    pub fn header(&self, id: NodeId) -> String {
        let node = self.node(id);
        let end = match node.kind {
            NodeKind::CreateUnit(_) => node
                .children
                .iter()
                .map(|&child| self.node(child))
                .find(|child| child.kind.is_member())
                .map_or(node.groups.end, |child| child.groups.start),
            _ => node.groups.end,
        };
        let mut text = String::new();
        for (offset, group) in self.groups[node.groups.start..end].iter().enumerate() {
            if offset == 0 {
                text.push_str(&group.text_from_key());
            } else {
                text.push_str(&group.text());
            }
        }
        let mut header = text.trim_end();
        for suffix in [";", "("] {
            if let Some(stripped) = header.strip_suffix(suffix) {
                header = stripped.trim_end();
            }
        }
        header.to_owned()
    }

    /// Nearest ancestor (or self) of the given kind.
    pub fn ancestor(&self, id: NodeId, predicate: impl Fn(NodeKind) -> bool) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if predicate(self.kind(node)) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// Indented outline of the tree, one node per line. For tests and
    /// debug logging.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.outline_into(NodeId::ROOT, 0, &mut out);
        }
        out
    }

    fn outline_into(&self, id: NodeId, depth: usize, out: &mut String) {
        use std::fmt::Write;
        let node = self.node(id);
        let _ = write!(out, "{:indent$}{:?}", "", node.kind, indent = depth * 2);
        if let Some(name) = &node.name {
            let _ = write!(out, " {name}");
        }
        out.push('\n');
        for &child in &node.children {
            self.outline_into(child, depth + 1, out);
        }
    }
}

fn flatten(groups: &[SqlGroup]) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    for group in groups {
        for token in group.tokens() {
            if token.is_trivia() {
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push_str(&token.text);
        }
    }
    out
}

/// Builds a [`SyntaxTree`] while the parser consumes groups.
#[derive(Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    groups: Vec<SqlGroup>,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Open a node as a child of the innermost open node.
    pub(crate) fn start(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        let parent = self.open.last().copied();
        self.nodes.push(SyntaxNode {
            kind,
            parent,
            children: Vec::new(),
            groups: self.groups.len()..self.groups.len(),
            name: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        self.open.push(id);
        id
    }

    /// Close the innermost open node.
    pub(crate) fn finish(&mut self) {
        if let Some(id) = self.open.pop() {
            self.nodes[id.index()].groups.end = self.groups.len();
        }
    }

    pub(crate) fn push_group(&mut self, group: SqlGroup) {
        self.groups.push(group);
    }

    pub(crate) fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    pub(crate) fn set_name(&mut self, id: NodeId, name: Name) {
        self.nodes[id.index()].name = Some(name);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Close any nodes left open and produce the tree.
    pub(crate) fn build(mut self) -> SyntaxTree {
        while !self.open.is_empty() {
            self.finish();
        }
        SyntaxTree {
            nodes: self.nodes,
            groups: self.groups,
        }
    }
}

#[cfg(test)]
mod tests;
