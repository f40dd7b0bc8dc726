//! Parser tests.
//!
//! - `statements`: top-level statement dispatch, terminators, SQL*Plus
//! - `package`: package specifications and their declarations
//! - `object_type`: object types and their members
//! - `errors`: syntax and lex error reporting
//! - `properties`: property tests over generated scripts

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod errors;
mod object_type;
mod properties;

use crate::{parse_source, NodeId, NodeKind, SyntaxTree};

/// Parse a script that must be free of errors.
fn trees(source: &str) -> Vec<SyntaxTree> {
    parse_source(source)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn single(source: &str) -> SyntaxTree {
    let mut trees = trees(source);
    assert_eq!(trees.len(), 1, "expected one statement");
    trees.remove(0)
}

/// Kinds of every top-level statement.
fn statement_kinds(source: &str) -> Vec<NodeKind> {
    trees(source).iter().map(|tree| tree.kind(tree.root())).collect()
}

/// Member declarations of a unit as `(kind, name)`.
fn members(tree: &SyntaxTree) -> Vec<(NodeKind, String)> {
    tree.children_where(tree.root(), NodeKind::is_member)
        .map(|id| (tree.kind(id), name_of(tree, id)))
        .collect()
}

fn name_of(tree: &SyntaxTree, id: NodeId) -> String {
    tree.name(id).map(ToString::to_string).unwrap_or_default()
}

/// The first node of the given kind, depth-first.
fn find(tree: &SyntaxTree, kind: NodeKind) -> NodeId {
    tree.ids()
        .find(|&id| tree.kind(id) == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in\n{}", tree.outline()))
}

/// Named node by kind and name.
fn find_named(tree: &SyntaxTree, kind: NodeKind, name: &str) -> NodeId {
    tree.ids()
        .find(|&id| tree.kind(id) == kind && name_of(tree, id) == name)
        .unwrap_or_else(|| panic!("no {kind:?} {name} in\n{}", tree.outline()))
}
