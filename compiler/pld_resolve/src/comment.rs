//! Per-node documentation records.

use pld_doc::Tag;
use pld_ir::TextSpan;
use pld_parse::{NodeId, NodeKind};

use crate::ContextId;

/// The syntax node a [`Comment`] belongs to.
#[derive(Clone, Debug, PartialEq)]
pub struct CodeRef {
    /// Index of the statement in resolution order.
    pub statement: usize,
    pub node: NodeId,
    pub kind: NodeKind,
    pub span: Option<TextSpan>,
}

/// Doc tags of one nameable node and the context they document.
///
/// `context` is `None` for nodes that are deliberately not documentable
/// (terminators, SQL*Plus commands, pragmas, bodies, unhandled statements).
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    pub code: CodeRef,
    pub context: Option<ContextId>,
    pub tags: Vec<Tag>,
}

impl Comment {
    pub fn has_docs(&self) -> bool {
        !self.tags.is_empty()
    }
}
