#![allow(clippy::unwrap_used, clippy::expect_used)]

use pld_ir::{Name, Position};

use super::*;
use crate::parse_source;
use pretty_assertions::assert_eq;

fn first_tree(source: &str) -> SyntaxTree {
    parse_source(source).next().unwrap().unwrap()
}

fn group(text: &str) -> SqlGroup {
    let tokens: Vec<SqlToken> = pld_lexer::lex(text).map(Result::unwrap).collect();
    pld_ir::TokenGroup::new(tokens).unwrap()
}

#[test]
fn builder_tracks_parents_and_ranges() {
    let mut builder = TreeBuilder::default();
    let root = builder.start(NodeKind::CreateUnit(UnitKind::Package));
    builder.push_group(group("create"));
    let ident = builder.start(NodeKind::Identifier);
    builder.push_group(group(" p"));
    builder.set_name(ident, Name::from_parts(["P"]));
    builder.finish();
    builder.push_group(group(" is"));
    let tree = builder.build();

    assert_eq!(root, NodeId::ROOT);
    assert_eq!(tree.children(root), &[ident]);
    assert_eq!(tree.parent(ident), Some(root));
    assert_eq!(tree.node(ident).groups, 1..2);
    assert_eq!(tree.node(root).groups, 0..3);
    assert_eq!(tree.name(ident).map(ToString::to_string), Some("P".into()));
}

#[test]
fn text_drops_leading_trivia_only() {
    let tree = first_tree("\n  /** doc */\n  CREATE PACKAGE p\n  IS END;");
    assert_eq!(tree.text(tree.root()), "CREATE PACKAGE p\n  IS END;");
    assert_eq!(tree.flat_text(tree.root()), "CREATE PACKAGE p IS END;");
}

#[test]
fn flat_text_after_a_keyword() {
    let tree = first_tree("CREATE PACKAGE p IS\n  TYPE t IS TABLE   OF\n NUMBER;\nEND;");
    let decl = tree
        .children_where(tree.root(), |kind| matches!(kind, NodeKind::TypeDecl(_)))
        .next()
        .unwrap();
    assert_eq!(tree.flat_text_after(decl, "IS").as_deref(), Some("TABLE OF NUMBER;"));
    assert_eq!(tree.flat_text_after(decl, "AS"), None);
}

#[test]
fn doc_comments_come_from_leading_trivia() {
    let tree = first_tree("/** one */ -- plain\n/** two */ CREATE PACKAGE p IS END;");
    let docs: Vec<&str> = tree
        .doc_comments(tree.root())
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(docs, vec![" one ", " two "]);
}

#[test]
fn span_starts_at_first_key() {
    let tree = first_tree("\n\n  CREATE PACKAGE p IS END;");
    let span = tree.span(tree.root()).unwrap();
    assert_eq!(span.start, Position::new(3, 3));
    assert_eq!(span.end, Position::new(3, 27));
}

#[test]
fn header_stops_at_first_member() {
    let tree = first_tree("CREATE PACKAGE p AUTHID DEFINER IS\n  x NUMBER;\nEND;");
    assert_eq!(tree.header(tree.root()), "CREATE PACKAGE p AUTHID DEFINER IS");

    let tree = first_tree("CREATE TYPE t AS OBJECT (a NUMBER);");
    assert_eq!(tree.header(tree.root()), "CREATE TYPE t AS OBJECT");
}

#[test]
fn header_of_member_drops_semicolon() {
    let tree = first_tree("CREATE PACKAGE p IS\n  FUNCTION f(a NUMBER)\n    RETURN DATE;\nEND;");
    let method = tree
        .children_where(tree.root(), |kind| matches!(kind, NodeKind::Method(_)))
        .next()
        .unwrap();
    assert_eq!(tree.header(method), "FUNCTION f(a NUMBER)\n    RETURN DATE");
}

#[test]
fn ancestor_finds_enclosing_unit() {
    let tree = first_tree("CREATE PACKAGE p IS PROCEDURE f(a NUMBER); END;");
    let parameter = tree
        .ids()
        .find(|&id| matches!(tree.kind(id), NodeKind::Parameter(_)))
        .unwrap();
    let unit = tree.ancestor(parameter, |kind| matches!(kind, NodeKind::CreateUnit(_)));
    assert_eq!(unit, Some(tree.root()));
    assert_eq!(tree.ancestor(parameter, |kind| kind == NodeKind::Body), None);
}

#[test]
fn words_are_normalized_values() {
    let tree = first_tree("create package \"Pkg\" is end;");
    assert_eq!(tree.words(tree.root()), vec!["CREATE", "PACKAGE", "Pkg", "IS", "END", ";"]);
}

#[test]
fn node_kind_display() {
    assert_eq!(NodeKind::CreateUnit(UnitKind::PackageBody).to_string(), "create package body");
    assert_eq!(NodeKind::Variable { constant: true }.to_string(), "constant");
    assert_eq!(NodeKind::Method(MethodKind::Cursor).to_string(), "Cursor");
    assert_eq!(NodeKind::Subtype.to_string(), "Subtype");
}
