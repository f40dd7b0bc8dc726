//! Tree traversal and dispatch.
//!
//! [`Resolver::visit`] is the single dispatch point: one exhaustive match on
//! [`NodeKind`]. Context construction lives in `declare.rs`, tag binding in
//! `bind.rs`, both as further `impl Resolver` blocks.

mod bind;
mod declare;

use pld_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode};
use pld_doc::Tag;
use pld_ir::{Name, Position};
use pld_parse::{NodeId, NodeKind, SyntaxTree, TypeDeclKind, UnitKind};
use rustc_hash::FxHashMap;

use crate::{
    CodeRef, Comment, ContextArena, ContextId, Detail, IdGenerator, Resolution, ResolveConfig,
};

/// Declarations visible inside one container, and work deferred until it
/// closes.
#[derive(Default)]
struct Scope {
    ids: IdGenerator,
    /// Declared exceptions by unqualified name.
    exceptions: FxHashMap<String, ContextId>,
    /// The same exceptions in declaration order.
    declared: Vec<ContextId>,
    pending_throws: Vec<PendingThrows>,
    /// `PRAGMA EXCEPTION_INIT(name, code)` seen in this container.
    exception_inits: Vec<(Name, String)>,
}

/// A `@throws` tag waiting for its container to close.
struct PendingThrows {
    context: ContextId,
    name: Name,
    description: String,
    at: Position,
}

/// Builds a [`Resolution`] one statement at a time.
///
/// Diagnostics go to the injected sink; nothing here is fatal.
pub struct Resolver<'a> {
    config: ResolveConfig,
    sink: &'a mut dyn DiagnosticSink,
    contexts: ContextArena,
    comments: Vec<Comment>,
    units: Vec<ContextId>,
    statement: usize,
    /// Innermost last. The file scope at the bottom closes in `finish`.
    scopes: Vec<Scope>,
}

impl<'a> Resolver<'a> {
    pub fn new(config: ResolveConfig, sink: &'a mut dyn DiagnosticSink) -> Self {
        Resolver {
            config,
            sink,
            contexts: ContextArena::new(),
            comments: Vec::new(),
            units: Vec::new(),
            statement: 0,
            scopes: vec![Scope::default()],
        }
    }

    /// Resolve one top-level statement.
    pub fn resolve_tree(&mut self, tree: &SyntaxTree) {
        if !tree.is_empty() {
            if let Some(unit) = self.visit(tree, tree.root(), None) {
                self.units.push(unit);
            }
        }
        self.statement += 1;
    }

    /// Resolve every statement of a file and finish.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn resolve_all<'t>(mut self, trees: impl IntoIterator<Item = &'t SyntaxTree>) -> Resolution {
        for tree in trees {
            self.resolve_tree(tree);
        }
        self.finish()
    }

    /// Close the file scope and hand over the results.
    pub fn finish(mut self) -> Resolution {
        while let Some(scope) = self.scopes.pop() {
            self.close_scope(scope);
        }
        tracing::debug!(
            contexts = self.contexts.len(),
            comments = self.comments.len(),
            "resolved"
        );
        Resolution {
            contexts: self.contexts,
            comments: self.comments,
            units: self.units,
        }
    }

    // ─── Dispatch ───────────────────────────────────────────────────

    /// Record a comment for a nameable node and build its context.
    fn visit(
        &mut self,
        tree: &SyntaxTree,
        id: NodeId,
        parent: Option<ContextId>,
    ) -> Option<ContextId> {
        let kind = tree.kind(id);
        if !is_nameable(kind) {
            return None;
        }

        let tags = self.doc_tags(tree, id);
        let context = match kind {
            NodeKind::CreateUnit(unit) => Some(self.declare_unit(tree, id, unit)),
            NodeKind::Method(method) => Some(self.declare_method(tree, id, method, parent)),
            NodeKind::Attribute => Some(self.declare_attribute(tree, id, parent)),
            NodeKind::Variable { constant } => {
                Some(self.declare_variable(tree, id, constant, parent))
            }
            NodeKind::Exception => Some(self.declare_exception(tree, id, parent)),
            NodeKind::Subtype => Some(self.declare_subtype(tree, id, parent)),
            NodeKind::TypeDecl(TypeDeclKind::Record) => Some(self.declare_record(tree, id, parent)),
            NodeKind::TypeDecl(decl) => Some(self.declare_type(tree, id, decl, parent)),
            NodeKind::Parameter(mode) => Some(self.declare_parameter(tree, id, mode, parent)),
            NodeKind::Field => Some(self.declare_field(tree, id, parent)),
            NodeKind::Pragma => {
                self.note_pragma(tree, id);
                None
            }
            NodeKind::Unhandled => {
                self.unresolved(tree, id);
                None
            }
            NodeKind::Terminator
            | NodeKind::SqlPlus
            | NodeKind::Body
            | NodeKind::ParameterList
            | NodeKind::Return
            | NodeKind::Identifier
            | NodeKind::TypeExpr
            | NodeKind::Expression
            | NodeKind::Literal
            | NodeKind::Keyword
            | NodeKind::Modifier => None,
        };

        let comment = self.comments.len();
        self.comments.push(Comment {
            code: CodeRef {
                statement: self.statement,
                node: id,
                kind,
                span: tree.span(id),
            },
            context,
            tags: Vec::new(),
        });

        if let Some(context) = context {
            match kind {
                NodeKind::CreateUnit(UnitKind::Package | UnitKind::ObjectType) => {
                    self.scopes.push(Scope::default());
                    self.visit_members(tree, id, context);
                    self.bind(context, &tags);
                    if let Some(scope) = self.scopes.pop() {
                        self.close_scope(scope);
                    }
                }
                NodeKind::CreateUnit(UnitKind::Procedure | UnitKind::Function)
                | NodeKind::Method(_) => {
                    if let Some(list) = tree.child(id, NodeKind::ParameterList) {
                        self.visit_members(tree, list, context);
                    }
                    self.bind(context, &tags);
                }
                NodeKind::TypeDecl(TypeDeclKind::Record) => {
                    self.visit_members(tree, id, context);
                    self.bind(context, &tags);
                }
                _ => self.bind(context, &tags),
            }
        }

        self.comments[comment].tags = tags;
        context
    }

    /// Visit the children of `node` as members of `owner`.
    fn visit_members(&mut self, tree: &SyntaxTree, node: NodeId, owner: ContextId) {
        for &child in tree.children(node) {
            let Some(member) = self.visit(tree, child, Some(owner)) else {
                continue;
            };
            match &mut self.contexts.get_mut(owner).detail {
                Detail::Method(method) => method.params.push(member),
                Detail::Record(record) => record.fields.push(member),
                _ => {}
            }
        }
    }

    // ─── Doc comments and diagnostics ───────────────────────────────

    /// Tags of every doc comment attached to a node, in order.
    fn doc_tags(&mut self, tree: &SyntaxTree, id: NodeId) -> Vec<Tag> {
        let mut tags = Vec::new();
        for token in tree.doc_comments(id) {
            for tag in pld_doc::parse_comment(token) {
                match tag {
                    Ok(tag) => tags.push(tag),
                    Err(err) => self.warn(
                        ErrorCode::W2004,
                        format!("malformed doc comment: {err}"),
                        Some(err.position().clone()),
                    ),
                }
            }
        }
        tags
    }

    fn unresolved(&mut self, tree: &SyntaxTree, id: NodeId) {
        let words = tree.words(id);
        let lead = words.iter().take(2).copied().collect::<Vec<_>>().join(" ");
        let at = tree.span(id).map(|span| span.start);
        self.warn(
            ErrorCode::W2001,
            format!("skipped unrecognised construct `{lead}`"),
            at,
        );
    }

    fn warn(&mut self, code: ErrorCode, message: String, at: Option<Position>) {
        let mut diagnostic = Diagnostic::warning(code).with_message(message);
        if let Some(at) = at {
            diagnostic = diagnostic.at(at);
        }
        self.sink.emit(diagnostic);
    }

    fn scope(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }
}

/// Nodes that get a [`Comment`]: declarations and statements, not the
/// pieces they are made of.
fn is_nameable(kind: NodeKind) -> bool {
    match kind {
        NodeKind::CreateUnit(_)
        | NodeKind::Variable { .. }
        | NodeKind::Exception
        | NodeKind::Subtype
        | NodeKind::TypeDecl(_)
        | NodeKind::Method(_)
        | NodeKind::Attribute
        | NodeKind::Field
        | NodeKind::Pragma
        | NodeKind::Parameter(_)
        | NodeKind::Terminator
        | NodeKind::SqlPlus
        | NodeKind::Unhandled
        | NodeKind::Body => true,
        NodeKind::ParameterList
        | NodeKind::Return
        | NodeKind::Identifier
        | NodeKind::TypeExpr
        | NodeKind::Expression
        | NodeKind::Literal
        | NodeKind::Keyword
        | NodeKind::Modifier => false,
    }
}
