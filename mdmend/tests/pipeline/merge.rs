//! End-to-end pipeline tests: repaired trees rendered through the formats,
//! plus property tests for the merge transform's global guarantees.

use mdmend::ast::{
    Break, Document, InlineCode, List, ListItem, Node, Paragraph, Text,
};
use mdmend::formats::html::{serialize_to_html, HtmlOptions};
use mdmend::formats::markdown::MarkdownExtensions;
use mdmend::transforms::{merge_inline_fragments, Pipeline};
use proptest::prelude::*;

fn text(value: &str) -> Node {
    Node::Text(Text {
        value: value.to_string(),
        position: None,
    })
}

fn code(value: &str) -> Node {
    Node::InlineCode(InlineCode {
        value: value.to_string(),
        position: None,
    })
}

fn para(children: Vec<Node>) -> Node {
    Node::Paragraph(Paragraph {
        children,
        position: None,
    })
}

/// The canonical fragmented document: one sentence split across five
/// paragraphs by inline code spans.
fn fragmented_command_reference() -> Document {
    Document::with_children(vec![
        para(vec![text("This takes the output of")]),
        para(vec![code("ls")]),
        para(vec![text("and uses it as input for")]),
        para(vec![code("grep")]),
        para(vec![text(", which filters lines containing \"report\".")]),
    ])
}

#[test]
fn repaired_document_renders_as_one_paragraph() {
    let mut doc = fragmented_command_reference();
    Pipeline::standard().run(&mut doc);

    let html = serialize_to_html(
        &doc,
        &MarkdownExtensions::default(),
        &HtmlOptions::default(),
    )
    .unwrap();

    assert_eq!(html.matches("<p>").count(), 1, "expected one paragraph: {html}");
    // comrak escapes double quotes in text content.
    assert!(html.contains(
        "This takes the output of <code>ls</code> and uses it as input for \
         <code>grep</code>, which filters lines containing &quot;report&quot;."
    ));
}

#[test]
fn unrepaired_document_renders_fragmented() {
    let doc = fragmented_command_reference();

    let html = serialize_to_html(
        &doc,
        &MarkdownExtensions::default(),
        &HtmlOptions::default(),
    )
    .unwrap();

    assert_eq!(html.matches("<p>").count(), 5);
}

#[test]
fn list_fragment_repair_survives_markdown_export() {
    let mut doc = Document::with_children(vec![
        Node::List(List {
            ordered: false,
            start: 1,
            children: vec![Node::ListItem(ListItem {
                checked: None,
                children: vec![para(vec![text("First point")])],
                position: None,
            })],
            position: None,
        }),
        para(vec![text("continued.")]),
    ]);

    Pipeline::standard().run(&mut doc);

    let exported =
        mdmend::formats::markdown::serializer::serialize_to_markdown(
            &doc,
            &MarkdownExtensions::default(),
        )
        .unwrap();
    assert!(exported.contains("- First point continued."));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Concatenation of every leaf text and inline-code value, in order.
fn leaf_text(doc: &Document) -> String {
    fn walk(nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(t) => out.push_str(&t.value),
                Node::InlineCode(c) => out.push_str(&c.value),
                _ => {
                    if let Some(children) = node.children() {
                        walk(children, out);
                    }
                }
            }
        }
    }
    let mut out = String::new();
    walk(&doc.children, &mut out);
    out
}

/// Whether `after` equals `before` with only single space characters added.
fn equals_up_to_inserted_spaces(before: &str, after: &str) -> bool {
    let mut remaining = before.chars().peekable();
    for c in after.chars() {
        match remaining.peek() {
            Some(&expected) if expected == c => {
                remaining.next();
            }
            _ if c == ' ' => {}
            _ => return false,
        }
    }
    remaining.next().is_none()
}

fn inline_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        4 => "[ a-zA-Z0-9,.;:()\\[\\]!?]{0,12}".prop_map(|value| Node::Text(Text {
            value,
            position: None,
        })),
        2 => "[a-z-]{0,8}".prop_map(|value| Node::InlineCode(InlineCode {
            value,
            position: None,
        })),
        1 => Just(Node::Break(Break { position: None })),
    ]
}

fn paragraph_strategy() -> impl Strategy<Value = Node> {
    prop::collection::vec(inline_strategy(), 0..4).prop_map(|children| {
        Node::Paragraph(Paragraph {
            children,
            position: None,
        })
    })
}

fn document_strategy() -> impl Strategy<Value = Document> {
    prop::collection::vec(paragraph_strategy(), 0..6).prop_map(Document::with_children)
}

proptest! {
    #[test]
    fn merge_is_idempotent(doc in document_strategy()) {
        let mut doc = doc;
        merge_inline_fragments(&mut doc);
        let once = doc.clone();
        merge_inline_fragments(&mut doc);
        prop_assert_eq!(doc, once);
    }

    #[test]
    fn merge_preserves_leaf_content(doc in document_strategy()) {
        let before = leaf_text(&doc);
        let mut repaired = doc.clone();
        merge_inline_fragments(&mut repaired);
        let after = leaf_text(&repaired);
        prop_assert!(
            equals_up_to_inserted_spaces(&before, &after),
            "content changed beyond inserted spaces: {:?} -> {:?}",
            before,
            after
        );
    }

    #[test]
    fn merge_never_grows_paragraph_count(doc in document_strategy()) {
        let before = doc.children.len();
        let mut repaired = doc;
        merge_inline_fragments(&mut repaired);
        prop_assert!(repaired.children.len() <= before);
    }
}
