//! Treeviz formatter for AST nodes
//!
//! Treeviz is a visual representation of the document tree, designed for
//! quick inspection of structure before and after transforms. It encodes
//! nesting with box-drawing connectors and tags every node with an icon
//! and a short label (truncated to 30 characters).
//!
//! Example:
//!
//! ```text
//! ⧉ Document
//! ├─ § Pipes and Filters
//! └─ ¶ This takes the output of…
//!    ├─ ◦ This takes the output…
//!    └─ ƒ ls
//! ```

use crate::ast::{Document, Node};
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::icons::get_icon;

const LABEL_MAX_CHARS: usize = 30;

/// Render a document tree as a treeviz string
pub fn to_treeviz_str(doc: &Document, show_line_numbers: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} Document\n", get_icon("Document")));

    let count = doc.children.len();
    for (index, child) in doc.children.iter().enumerate() {
        format_node(child, "", index, count, show_line_numbers, &mut output);
    }
    output
}

fn format_node(
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_linum: bool,
    output: &mut String,
) {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let icon = get_icon(node.node_type());

    let linum_prefix = if show_linum {
        match node.position() {
            Some(position) => format!("{:02} ", position.start.line),
            None => "·· ".to_string(),
        }
    } else {
        String::new()
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        icon,
        node_label(node)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "   " } else { "│  " });
    if let Some(children) = node.children() {
        let count = children.len();
        for (index, child) in children.iter().enumerate() {
            format_node(child, &child_prefix, index, count, show_linum, output);
        }
    }
}

fn node_label(node: &Node) -> String {
    let label = match node {
        Node::Heading(h) => format!("h{} {}", h.depth, node.plain_text()),
        Node::List(l) => format!(
            "{} {} items",
            if l.ordered { "ordered" } else { "unordered" },
            l.children.len()
        ),
        Node::CodeBlock(c) => c.language.clone().unwrap_or_else(|| "code".to_string()),
        Node::Link(l) => l.url.clone(),
        Node::Image(i) => i.url.clone(),
        Node::Text(t) => t.value.clone(),
        Node::InlineCode(c) => c.value.clone(),
        Node::ThematicBreak(_) | Node::Break(_) => String::new(),
        _ => node.plain_text(),
    };
    truncate_label(&label)
}

fn truncate_label(label: &str) -> String {
    let label = label.replace('\n', " ");
    if label.chars().count() <= LABEL_MAX_CHARS {
        return label;
    }
    let truncated: String = label.chars().take(LABEL_MAX_CHARS - 1).collect();
    format!("{truncated}…")
}

/// Format implementation for treeviz (export only)
#[derive(Default)]
pub struct TreevizFormat {
    pub show_line_numbers: bool,
}

impl TreevizFormat {
    pub fn new(show_line_numbers: bool) -> Self {
        TreevizFormat { show_line_numbers }
    }
}

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Tree visualization of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc, self.show_line_numbers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{InlineCode, List, ListItem, Paragraph, Text};

    fn text(value: &str) -> Node {
        Node::Text(Text {
            value: value.to_string(),
            position: None,
        })
    }

    fn sample_doc() -> Document {
        Document::with_children(vec![
            Node::Paragraph(Paragraph {
                children: vec![
                    text("Run "),
                    Node::InlineCode(InlineCode {
                        value: "ls".to_string(),
                        position: None,
                    }),
                ],
                position: None,
            }),
            Node::List(List {
                ordered: false,
                start: 1,
                children: vec![Node::ListItem(ListItem {
                    checked: None,
                    children: vec![Node::Paragraph(Paragraph {
                        children: vec![text("item")],
                        position: None,
                    })],
                    position: None,
                })],
                position: None,
            }),
        ])
    }

    #[test]
    fn renders_connectors_and_icons() {
        let output = to_treeviz_str(&sample_doc(), false);

        assert_eq!(
            output,
            "⧉ Document\n\
             ├─ ¶ Run ls\n\
             │  ├─ ◦ Run \n\
             │  └─ ƒ ls\n\
             └─ ☰ unordered 1 items\n\
             \u{20}  └─ • item\n\
             \u{20}     └─ ¶ item\n\
             \u{20}        └─ ◦ item\n"
        );
    }

    #[test]
    fn truncates_long_labels() {
        let long = "a".repeat(64);
        let doc = Document::with_children(vec![Node::Paragraph(Paragraph {
            children: vec![text(&long)],
            position: None,
        })]);

        let output = to_treeviz_str(&doc, false);
        assert!(output.contains('…'));
        assert!(!output.contains(&long));
    }

    #[test]
    fn line_numbers_prefix_rows() {
        let doc = Document::with_children(vec![Node::Paragraph(Paragraph {
            children: vec![text("positioned")],
            position: Some(crate::ast::Position::new(7, 1, 7, 11)),
        })]);

        let output = to_treeviz_str(&doc, true);
        assert!(output.contains("07 └─ ¶ positioned"));
    }
}
