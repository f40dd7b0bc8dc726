use pretty_assertions::assert_eq;

use super::{find_named, members, name_of, single, statement_kinds};
use crate::{MethodKind, NodeKind, UnitKind};

#[test]
fn object_type_outline() {
    let tree = single(
        "CREATE TYPE shape AS OBJECT (\n\
         \x20 name VARCHAR2(30),\n\
         \x20 MEMBER FUNCTION area RETURN NUMBER,\n\
         \x20 NOT FINAL MEMBER PROCEDURE draw(scale NUMBER DEFAULT 1),\n\
         \x20 CONSTRUCTOR FUNCTION shape(name VARCHAR2) RETURN SELF AS RESULT\n\
         ) NOT FINAL;",
    );
    assert_eq!(
        tree.outline(),
        "CreateUnit(ObjectType) SHAPE\n\
         \x20 Identifier SHAPE\n\
         \x20 Keyword\n\
         \x20 Attribute NAME\n\
         \x20   Identifier NAME\n\
         \x20   TypeExpr VARCHAR2\n\
         \x20 Method(Function) AREA\n\
         \x20   Modifier MEMBER\n\
         \x20   Identifier AREA\n\
         \x20   Return\n\
         \x20     TypeExpr NUMBER\n\
         \x20 Method(Procedure) DRAW\n\
         \x20   Modifier NOT FINAL\n\
         \x20   Modifier MEMBER\n\
         \x20   Identifier DRAW\n\
         \x20   ParameterList\n\
         \x20     Parameter(In) SCALE\n\
         \x20       Identifier SCALE\n\
         \x20       TypeExpr NUMBER\n\
         \x20       Expression\n\
         \x20 Method(Constructor) SHAPE\n\
         \x20   Identifier SHAPE\n\
         \x20   ParameterList\n\
         \x20     Parameter(In) NAME\n\
         \x20       Identifier NAME\n\
         \x20       TypeExpr VARCHAR2\n\
         \x20   Return\n\
         \x20     TypeExpr SELF AS RESULT\n\
         \x20 Modifier NOT FINAL\n"
    );
}

#[test]
fn map_and_order_members() {
    let tree = single(
        "CREATE OR REPLACE TYPE money_t FORCE AUTHID DEFINER AS OBJECT (\n\
         \x20 amount NUMBER,\n\
         \x20 MAP MEMBER FUNCTION sort_key RETURN NUMBER DETERMINISTIC,\n\
         \x20 STATIC FUNCTION zero RETURN money_t,\n\
         \x20 PRAGMA RESTRICT_REFERENCES(sort_key, WNDS)\n\
         );",
    );
    assert_eq!(
        members(&tree),
        vec![
            (NodeKind::Attribute, "AMOUNT".to_string()),
            (NodeKind::Method(MethodKind::Function), "SORT_KEY".to_string()),
            (NodeKind::Method(MethodKind::Function), "ZERO".to_string()),
            (NodeKind::Pragma, "RESTRICT_REFERENCES".to_string()),
        ]
    );
    let sort_key = find_named(&tree, NodeKind::Method(MethodKind::Function), "SORT_KEY");
    let modifiers: Vec<String> = tree
        .children_where(sort_key, |kind| kind == NodeKind::Modifier)
        .map(|id| name_of(&tree, id))
        .collect();
    assert_eq!(modifiers, vec!["MAP", "MEMBER", "DETERMINISTIC"]);
}

#[test]
fn subtype_under_supertype() {
    let tree = single(
        "CREATE TYPE circle UNDER shape (\n\
         \x20 radius NUMBER,\n\
         \x20 OVERRIDING MEMBER FUNCTION area RETURN NUMBER\n\
         );",
    );
    let under = tree
        .children_where(tree.root(), |kind| kind == NodeKind::Modifier)
        .next()
        .unwrap();
    assert_eq!(name_of(&tree, under), "UNDER");
    let supertype = tree.child(under, NodeKind::TypeExpr).unwrap();
    assert_eq!(name_of(&tree, supertype), "SHAPE");
    assert_eq!(members(&tree).len(), 2);
}

#[test]
fn collection_types() {
    let source = "CREATE TYPE num_list AS TABLE OF NUMBER;\n\
                  /\n\
                  CREATE TYPE name_arr AS VARRAY(20) OF VARCHAR2(100) NOT NULL;\n\
                  /\n";
    assert_eq!(
        statement_kinds(source),
        vec![
            NodeKind::CreateUnit(UnitKind::ObjectType),
            NodeKind::Terminator,
            NodeKind::CreateUnit(UnitKind::ObjectType),
            NodeKind::Terminator,
        ]
    );
    let tree = single("CREATE TYPE name_arr AS VARRAY(20) OF VARCHAR2(100);");
    let element = tree.child(tree.root(), NodeKind::TypeExpr).unwrap();
    assert_eq!(name_of(&tree, element), "VARCHAR2");
    assert!(tree.child(tree.root(), NodeKind::Literal).is_some());
    assert!(members(&tree).is_empty());
}

#[test]
fn forward_declaration() {
    let tree = single("CREATE TYPE node_t;");
    assert_eq!(tree.kind(tree.root()), NodeKind::CreateUnit(UnitKind::ObjectType));
    assert_eq!(name_of(&tree, tree.root()), "NODE_T");
}

#[test]
fn type_body_is_opaque() {
    let tree = single(
        "CREATE OR REPLACE TYPE BODY shape AS\n\
         \x20 MEMBER FUNCTION area RETURN NUMBER IS BEGIN RETURN 0; END;\n\
         END;",
    );
    assert_eq!(tree.kind(tree.root()), NodeKind::CreateUnit(UnitKind::TypeBody));
    assert_eq!(
        members(&tree),
        vec![(NodeKind::Body, String::new())]
    );
}
