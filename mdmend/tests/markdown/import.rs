//! Import tests for the Markdown format (Markdown → document tree)
//!
//! These tests verify that Markdown documents are correctly converted to
//! the document tree by checking the resulting structure.

use crate::common::md_to_doc;
use mdmend::ast::Node;

#[test]
fn test_paragraph_simple() {
    let doc = md_to_doc("This is a simple paragraph.\n");

    assert!(!doc.children.is_empty());
    match &doc.children[0] {
        Node::Paragraph(_) => {}
        _ => panic!("Expected paragraph element"),
    }
}

#[test]
fn test_heading_levels() {
    let doc = md_to_doc("# Top\n\n## Nested\n\nContent.\n");

    let depths: Vec<u8> = doc
        .children
        .iter()
        .filter_map(|n| match n {
            Node::Heading(h) => Some(h.depth),
            _ => None,
        })
        .collect();
    assert_eq!(depths, vec![1, 2]);
}

#[test]
fn test_kitchensink_structure() {
    let doc = md_to_doc(&crate::common::KITCHENSINK);

    fn check(children: &[Node], flags: &mut (bool, bool, bool, bool, bool)) {
        for node in children {
            match node {
                Node::Paragraph(_) => flags.0 = true,
                Node::List(_) => flags.1 = true,
                Node::CodeBlock(_) => flags.2 = true,
                Node::Blockquote(_) => flags.3 = true,
                Node::Table(_) => flags.4 = true,
                _ => {}
            }
            if let Some(kids) = node.children() {
                check(kids, flags);
            }
        }
    }

    let mut flags = (false, false, false, false, false);
    check(&doc.children, &mut flags);
    let (has_paragraph, has_list, has_code, has_quote, has_table) = flags;

    assert!(has_paragraph, "Kitchensink should have paragraphs");
    assert!(has_list, "Kitchensink should have lists");
    assert!(has_code, "Kitchensink should have code blocks");
    assert!(has_quote, "Kitchensink should have a blockquote");
    assert!(has_table, "Kitchensink should have a table");
}

#[test]
fn test_kitchensink_positions_are_monotonic() {
    let doc = md_to_doc(&crate::common::KITCHENSINK);

    let mut last_line = 0;
    for child in &doc.children {
        let position = child
            .position()
            .unwrap_or_else(|| panic!("{} should carry a position", child.node_type()));
        assert!(
            position.start.line >= last_line,
            "block start lines should not go backwards"
        );
        last_line = position.start.line;
    }
}

#[test]
fn test_link_and_image_attributes() {
    let doc = md_to_doc("See [docs](https://example.org \"Docs\") and ![alt text](img.png).\n");

    let Node::Paragraph(p) = &doc.children[0] else {
        panic!("Expected paragraph");
    };

    let link = p
        .children
        .iter()
        .find_map(|n| match n {
            Node::Link(l) => Some(l),
            _ => None,
        })
        .expect("paragraph should contain a link");
    assert_eq!(link.url, "https://example.org");
    assert_eq!(link.title.as_deref(), Some("Docs"));

    let image = p
        .children
        .iter()
        .find_map(|n| match n {
            Node::Image(i) => Some(i),
            _ => None,
        })
        .expect("paragraph should contain an image");
    assert_eq!(image.url, "img.png");
    assert_eq!(image.alt, "alt text");
}

#[test]
fn test_strikethrough_extension() {
    let doc = md_to_doc("This is ~~gone~~ now.\n");

    let Node::Paragraph(p) = &doc.children[0] else {
        panic!("Expected paragraph");
    };
    assert!(p
        .children
        .iter()
        .any(|n| matches!(n, Node::Strikethrough(_))));
}
