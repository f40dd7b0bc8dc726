use pld_ir::{Position, TextSpan};

use super::*;
use pretty_assertions::assert_eq;

fn text(s: &str) -> ContentNode {
    ContentNode::Text(s.to_string())
}

fn link(reference: &str, content: Content) -> Tag {
    Tag {
        marker: "link".to_string(),
        body: TagBody::Link {
            target: LinkTarget::Missing,
            reference: reference.to_string(),
        },
        content,
        span: TextSpan::point(Position::start()),
    }
}

#[test]
fn text_trims_lines_and_blank_edges() {
    let content = Content {
        nodes: vec![
            ContentNode::Newline,
            text("  first line  "),
            ContentNode::Newline,
            text("   second"),
            ContentNode::Newline,
            text("   "),
            ContentNode::Newline,
        ],
    };
    assert_eq!(content.text(), "first line\nsecond");
}

#[test]
fn inner_blank_lines_are_kept() {
    let content = Content {
        nodes: vec![text("a"), ContentNode::Newline, ContentNode::Newline, text("b")],
    };
    assert_eq!(content.text(), "a\n\nb");
}

#[test]
fn push_text_merges_runs() {
    let mut content = Content::default();
    content.push_text("a");
    content.push_text(" b");
    content.push(ContentNode::Newline);
    content.push_text("c");
    assert_eq!(content.nodes, vec![text("a b"), ContentNode::Newline, text("c")]);
}

#[test]
fn link_display_prefers_content() {
    let mut content = Content::default();
    content.push_text(" the docs ");
    assert_eq!(link("#other", content).display_text(), "the docs");
    assert_eq!(link("#other", Content::default()).display_text(), "#other");
}

#[test]
fn inline_tags_render_through_display_text() {
    let content = Content {
        nodes: vec![
            text("see "),
            ContentNode::InlineTag(Box::new(link("pkg.f", Content::default()))),
            text(" and "),
            ContentNode::Literal("quoted".to_string()),
        ],
    };
    assert_eq!(content.text(), "see pkg.f and quoted");
    assert_eq!(content.inline_tags().count(), 1);
}

#[test]
fn generic_kind_is_the_marker() {
    let tag = Tag {
        marker: "deprecated".to_string(),
        body: TagBody::Generic,
        content: Content::default(),
        span: TextSpan::point(Position::start()),
    };
    assert_eq!(tag.kind(), "deprecated");
    assert_eq!(tag.name(), None);
    assert_eq!(tag.target(), None);
}

#[test]
fn hidden_visibility() {
    assert!(Visibility::Private.is_hidden());
    assert!(Visibility::Internal.is_hidden());
    assert!(Visibility::Api("private".to_string()).is_hidden());
    assert!(!Visibility::Api("public".to_string()).is_hidden());
    assert!(!Visibility::Protected.is_hidden());
    assert_eq!(Visibility::Api("beta".to_string()).as_str(), "beta");
}
