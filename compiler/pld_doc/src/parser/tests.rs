#![allow(clippy::unwrap_used, clippy::expect_used)]

use pld_ir::{Name, Position};

use super::*;
use pretty_assertions::assert_eq;

fn tags(text: &str) -> Vec<Tag> {
    parse_text(text, Position::start())
        .map(Result::unwrap)
        .collect()
}

fn single(text: &str) -> Tag {
    let mut tags = tags(text);
    assert_eq!(tags.len(), 1, "{tags:#?}");
    tags.remove(0)
}

fn param(tag: &Tag) -> &ParamTag {
    match &tag.body {
        TagBody::Param(param) => param,
        other => panic!("expected a param tag, got {other:?}"),
    }
}

#[test]
fn description_params_and_return() {
    let tags = tags(
        "/**
 * Returns the employee name.
 *
 * @param p_id   employee id
 * @param {VARCHAR2} p_default - fallback
 *   continues here
 * @return the name
 */",
    );
    let kinds: Vec<&str> = tags.iter().map(Tag::kind).collect();
    assert_eq!(kinds, vec!["description", "param", "param", "return"]);

    assert_eq!(tags[0].content.text(), "Returns the employee name.");
    assert_eq!(tags[0].marker, "");

    assert_eq!(param(&tags[1]).name, Some(Name::from("P_ID")));
    assert_eq!(tags[1].content.text(), "employee id");

    let fallback = param(&tags[2]);
    assert_eq!(fallback.name, Some(Name::from("P_DEFAULT")));
    assert_eq!(
        fallback.type_expr.as_ref().map(|t| t.text.as_str()),
        Some("VARCHAR2")
    );
    assert_eq!(tags[2].content.text(), "fallback\ncontinues here");

    assert_eq!(tags[3].content.text(), "the name");
    assert!(tags[3].type_expr().is_none());
}

#[test]
fn hash_link_displays_its_reference() {
    let tag = single("/** @see #other */");
    assert_eq!(tag.kind(), "link");
    assert_eq!(tag.marker, "see");
    match tag.target() {
        Some(LinkTarget::Hash(reference)) => {
            assert_eq!(reference.name, Name::from("OTHER"));
            assert_eq!(reference.text, "other");
            assert_eq!(reference.args, None);
        }
        other => panic!("expected a hash target, got {other:?}"),
    }
    assert_eq!(tag.display_text(), "#other");
}

#[test]
fn identifier_link_with_arguments() {
    let tag = single("/** @see emp_api.get_name(p_id, 'x') the lookup */");
    let Some(LinkTarget::Identifier(reference)) = tag.target() else {
        panic!("expected an identifier target, got {:?}", tag.target());
    };
    assert_eq!(reference.name.to_string(), "EMP_API.GET_NAME");
    assert_eq!(reference.text, "emp_api.get_name");
    assert_eq!(
        reference.args,
        Some(vec!["p_id".to_string(), "'x'".to_string()])
    );
    assert_eq!(
        tag.body,
        TagBody::Link {
            target: LinkTarget::Identifier(reference.clone()),
            reference: "emp_api.get_name(p_id, 'x')".to_string(),
        }
    );
    assert_eq!(tag.display_text(), "the lookup");
}

#[test]
fn url_and_missing_targets() {
    let tags = tags("/**\n * @link https://example.com/docs Docs\n * @see\n */");
    assert_eq!(
        tags[0].target(),
        Some(&LinkTarget::Url("https://example.com/docs".to_string()))
    );
    assert_eq!(tags[0].display_text(), "Docs");
    assert_eq!(tags[1].target(), Some(&LinkTarget::Missing));
    assert_eq!(tags[1].display_text(), "");
}

#[test]
fn brace_link_target() {
    let tag = single("/** @seealso {emp_api.hire} */");
    let Some(LinkTarget::Expression(expr)) = tag.target() else {
        panic!("expected an expression target");
    };
    assert_eq!(expr.delimiter, Delimiter::Brace);
    assert_eq!(expr.text, "emp_api.hire");
    assert_eq!(tag.display_text(), "{emp_api.hire}");
}

#[test]
fn inline_links_render_as_display_text() {
    let tag = single("/** Uses {@link #helper the helper} first. */");
    assert!(tag.is_description());
    assert_eq!(tag.content.text(), "Uses the helper first.");
    let inline: Vec<&Tag> = tag.content.inline_tags().collect();
    assert_eq!(inline.len(), 1);
    assert!(matches!(inline[0].target(), Some(LinkTarget::Hash(_))));
}

#[test]
fn inline_link_without_text_shows_reference() {
    let tag = single("/** See {@link emp_api}. */");
    assert_eq!(tag.content.text(), "See emp_api.");
}

#[test]
fn tags_on_one_line() {
    let tags = tags("/** Adds. @param a first @param b second @return the sum */");
    let summary: Vec<(&str, Option<String>, String)> = tags
        .iter()
        .map(|tag| (tag.kind(), tag.name().map(ToString::to_string), tag.content.text()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("description", None, "Adds.".to_string()),
            ("param", Some("A".to_string()), "first".to_string()),
            ("param", Some("B".to_string()), "second".to_string()),
            ("return", None, "the sum".to_string()),
        ]
    );
}

#[test]
fn markers_glued_to_text_stay_text() {
    let tag = single("/** Write to ops@example.com today */");
    assert_eq!(tag.content.text(), "Write to ops@example.com today");
}

#[test]
fn markers_inside_braces_stay_inline() {
    let tag = single("/** See {@link emp_api @since} there */");
    assert!(tag.is_description());
    assert_eq!(tag.content.inline_tags().count(), 1);
}

#[test]
fn optional_and_default_params() {
    let tags = tags("/**\n * @param [p_flag=TRUE] whether\n * @param p_n = 10 count\n * @arg p_x\n */");
    let flag = param(&tags[0]);
    assert_eq!(flag.name, Some(Name::from("P_FLAG")));
    assert_eq!(flag.default_value.as_deref(), Some("TRUE"));
    assert!(flag.optional);
    assert_eq!(tags[0].content.text(), "whether");

    let count = param(&tags[1]);
    assert_eq!(count.default_value.as_deref(), Some("10"));
    assert!(!count.optional);
    assert_eq!(tags[1].content.text(), "count");

    assert_eq!(tags[2].kind(), "param");
    assert_eq!(tags[2].marker, "arg");
    assert_eq!(tags[2].content.text(), "");
}

#[test]
fn throws_names_and_codes() {
    let tags = tags(
        "/**\n * @throws NO_DATA_FOUND if missing\n * @throws -20001 bad input\n * @exception ORA-01403\n */",
    );
    let names: Vec<String> = tags
        .iter()
        .map(|tag| tag.name().map(ToString::to_string).unwrap_or_default())
        .collect();
    assert_eq!(names, vec!["NO_DATA_FOUND", "-20001", "ORA-01403"]);
    assert_eq!(tags[0].content.text(), "if missing");
    assert_eq!(tags[2].kind(), "throws");
}

#[test]
fn visibility_markers() {
    let tags = tags("/**\n * @private\n * @api Internal\n * @public\n */");
    let visibility: Vec<&Visibility> = tags
        .iter()
        .filter_map(|tag| match &tag.body {
            TagBody::Visibility(v) => Some(v),
            _ => None,
        })
        .collect();
    assert_eq!(
        visibility,
        vec![
            &Visibility::Private,
            &Visibility::Api("internal".to_string()),
            &Visibility::Public,
        ]
    );
    assert!(visibility[1].is_hidden());
}

#[test]
fn unknown_tags_are_generic() {
    let tags = tags("/**\n * @deprecated use v2 instead\n * @since 1.2\n */");
    assert_eq!(tags[0].kind(), "deprecated");
    assert_eq!(tags[0].body, TagBody::Generic);
    assert_eq!(tags[0].content.text(), "use v2 instead");
    assert_eq!(tags[1].kind(), "since");
    assert_eq!(tags[1].content.text(), "1.2");
}

#[test]
fn structured_content() {
    let tag = single("/** Returns {NUMBER|NULL} or [a, b] #p_id */");
    let nodes = &tag.content.nodes;
    let ContentNode::Brace(brace) = &nodes[1] else {
        panic!("expected a brace expression, got {:?}", nodes[1]);
    };
    assert_eq!(brace.text, "NUMBER|NULL");
    assert_eq!(brace.items.len(), 3);
    assert_eq!(brace.items[1], ExprItem::Punct("|".to_string()));
    assert!(matches!(&nodes[3], ContentNode::Bracket(expr) if expr.text == "a, b"));
    assert!(matches!(&nodes[5], ContentNode::Hash(r) if r.name == Name::from("P_ID")));
    assert_eq!(tag.content.text(), "Returns {NUMBER|NULL} or [a, b] #p_id");
}

#[test]
fn strings_inside_braces_are_literals() {
    let tag = single("/** Default {\"a b\", 42} */");
    let ContentNode::Brace(expr) = &tag.content.nodes[1] else {
        panic!("expected a brace expression");
    };
    assert_eq!(
        expr.items,
        vec![
            ExprItem::Literal("a b".to_string()),
            ExprItem::Punct(",".to_string()),
            ExprItem::Literal("42".to_string()),
        ]
    );
}

#[test]
fn escaped_marker_is_text() {
    let tag = single(r"/** \@param is not a tag */");
    assert!(tag.is_description());
    assert_eq!(tag.content.text(), "@param is not a tag");
}

#[test]
fn unclosed_brace_ends_at_next_block_tag() {
    let tags = tags("/**\n * @param {NUMBER x\n * @return y\n */");
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[0].type_expr().map(|t| t.text.as_str()), Some("NUMBER x"));
    assert_eq!(tags[0].name(), None);
    assert_eq!(tags[1].kind(), "return");
    assert_eq!(tags[1].content.text(), "y");
}

#[test]
fn positions_are_relative_to_the_comment() {
    let mut tags = parse_text("/** @return x */", Position::new(3, 5));
    let tag = tags.next().unwrap().unwrap();
    assert_eq!(tag.span.start, Position::new(3, 9));
    assert!(tags.next().is_none());
}

#[test]
fn parse_comment_uses_the_token_position() {
    let tokens: Vec<_> = pld_lexer::lex("\n  /** @return x */ FUNCTION")
        .map(Result::unwrap)
        .collect();
    let comment = tokens
        .iter()
        .find(|token| token.kind == pld_lexer::SqlKind::DocComment)
        .unwrap();
    let tag = parse_comment(comment).next().unwrap().unwrap();
    assert_eq!(tag.span.start, Position::new(2, 7));
}

#[test]
fn empty_comments_have_no_tags() {
    assert!(tags("/** */").is_empty());
    assert!(tags("/***/").is_empty());
    assert!(tags("/**\n *\n */").is_empty());
}

#[test]
fn fused_after_the_last_tag() {
    let mut tags = parse_text("/** x */", Position::start());
    assert!(tags.next().is_some());
    assert!(tags.next().is_none());
    assert!(tags.next().is_none());
}
