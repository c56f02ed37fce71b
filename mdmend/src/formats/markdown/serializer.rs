//! Markdown serialization (document tree → Markdown export)
//!
//! Converts the mdmend document tree to CommonMark.
//! Pipeline: mdmend AST → Comrak AST → Markdown string (comrak's writer)

use crate::ast::{ColumnAlignment, Document, Node};
use crate::error::FormatError;
use crate::formats::markdown::{parser::comrak_options, MarkdownExtensions};
use comrak::nodes::{
    Ast, AstNode, ListDelimType, ListType, NodeCode, NodeCodeBlock, NodeHeading, NodeHtmlBlock,
    NodeLink, NodeList, NodeTable, NodeValue, TableAlignment,
};
use comrak::{format_commonmark, Arena};
use std::cell::RefCell;

/// Serialize a document tree to Markdown
pub fn serialize_to_markdown(
    doc: &Document,
    extensions: &MarkdownExtensions,
) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = build_comrak_ast(&arena, doc);

    let mut output = Vec::new();
    let options = comrak_options(extensions);
    format_commonmark(root, &options, &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak serialization failed: {e}"))
    })?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// Build a Comrak AST from a document tree
pub(crate) fn build_comrak_ast<'a>(
    arena: &'a Arena<AstNode<'a>>,
    doc: &Document,
) -> &'a AstNode<'a> {
    let root = new_node(arena, NodeValue::Document);
    for child in &doc.children {
        append_node(arena, root, child);
    }
    root
}

fn new_node<'a>(arena: &'a Arena<AstNode<'a>>, value: NodeValue) -> &'a AstNode<'a> {
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, (0, 0).into()))))
}

fn append_container<'a>(
    arena: &'a Arena<AstNode<'a>>,
    parent: &'a AstNode<'a>,
    value: NodeValue,
    children: &[Node],
) {
    let node = new_node(arena, value);
    parent.append(node);
    for child in children {
        append_node(arena, node, child);
    }
}

fn list_attributes(ordered: bool, start: u32) -> NodeList {
    NodeList {
        list_type: if ordered {
            ListType::Ordered
        } else {
            ListType::Bullet
        },
        marker_offset: 0,
        padding: 0,
        start: start as usize,
        delimiter: ListDelimType::Period,
        bullet_char: b'-',
        tight: true, // Use tight lists to avoid blank lines between items
        ..NodeList::default()
    }
}

fn append_node<'a>(arena: &'a Arena<AstNode<'a>>, parent: &'a AstNode<'a>, node: &Node) {
    match node {
        Node::Paragraph(p) => {
            append_container(arena, parent, NodeValue::Paragraph, &p.children);
        }

        Node::Heading(h) => {
            append_container(
                arena,
                parent,
                NodeValue::Heading(NodeHeading {
                    level: h.depth.min(6),
                    setext: false,
                }),
                &h.children,
            );
        }

        Node::Blockquote(bq) => {
            append_container(arena, parent, NodeValue::BlockQuote, &bq.children);
        }

        Node::List(list) => {
            append_container(
                arena,
                parent,
                NodeValue::List(list_attributes(list.ordered, list.start)),
                &list.children,
            );
        }

        Node::ListItem(item) => {
            let value = match item.checked {
                Some(checked) => NodeValue::TaskItem(if checked { Some('x') } else { None }),
                None => NodeValue::Item(list_attributes(false, 1)),
            };
            append_container(arena, parent, value, &item.children);
        }

        Node::CodeBlock(code) => {
            let mut literal = code.value.clone();
            if !literal.is_empty() && !literal.ends_with('\n') {
                literal.push('\n');
            }
            let code_node = new_node(
                arena,
                NodeValue::CodeBlock(NodeCodeBlock {
                    fenced: true,
                    fence_char: b'`',
                    fence_length: 3,
                    fence_offset: 0,
                    info: code.language.clone().unwrap_or_default(),
                    literal,
                }),
            );
            parent.append(code_node);
        }

        Node::ThematicBreak(_) => {
            parent.append(new_node(arena, NodeValue::ThematicBreak));
        }

        Node::HtmlBlock(html) => {
            let node = new_node(
                arena,
                NodeValue::HtmlBlock(NodeHtmlBlock {
                    block_type: 0,
                    literal: html.value.clone(),
                }),
            );
            parent.append(node);
        }

        Node::Table(table) => {
            let alignments: Vec<TableAlignment> = table
                .alignments
                .iter()
                .map(|alignment| match alignment {
                    ColumnAlignment::Left => TableAlignment::Left,
                    ColumnAlignment::Center => TableAlignment::Center,
                    ColumnAlignment::Right => TableAlignment::Right,
                    ColumnAlignment::None => TableAlignment::None,
                })
                .collect();
            let num_rows = table.children.len();
            let num_nonempty_cells = table
                .children
                .iter()
                .filter_map(Node::children)
                .flatten()
                .filter(|cell| {
                    cell.children()
                        .map(|kids| !kids.is_empty())
                        .unwrap_or(false)
                })
                .count();
            append_container(
                arena,
                parent,
                NodeValue::Table(NodeTable {
                    num_columns: alignments.len(),
                    alignments,
                    num_rows,
                    num_nonempty_cells,
                }),
                &table.children,
            );
        }

        Node::TableRow(row) => {
            append_container(arena, parent, NodeValue::TableRow(row.header), &row.children);
        }

        Node::TableCell(cell) => {
            append_container(arena, parent, NodeValue::TableCell, &cell.children);
        }

        Node::Text(text) => {
            parent.append(new_node(arena, NodeValue::Text(text.value.clone())));
        }

        Node::InlineCode(code) => {
            parent.append(new_node(
                arena,
                NodeValue::Code(NodeCode {
                    num_backticks: 1,
                    literal: code.value.clone(),
                }),
            ));
        }

        Node::Emphasis(em) => {
            append_container(arena, parent, NodeValue::Emph, &em.children);
        }

        Node::Strong(strong) => {
            append_container(arena, parent, NodeValue::Strong, &strong.children);
        }

        Node::Strikethrough(strike) => {
            append_container(arena, parent, NodeValue::Strikethrough, &strike.children);
        }

        Node::Link(link) => {
            append_container(
                arena,
                parent,
                NodeValue::Link(NodeLink {
                    url: link.url.clone(),
                    title: link.title.clone().unwrap_or_default(),
                }),
                &link.children,
            );
        }

        Node::Image(image) => {
            let image_node = new_node(
                arena,
                NodeValue::Image(NodeLink {
                    url: image.url.clone(),
                    title: image.title.clone().unwrap_or_default(),
                }),
            );
            parent.append(image_node);
            if !image.alt.is_empty() {
                image_node.append(new_node(arena, NodeValue::Text(image.alt.clone())));
            }
        }

        Node::Break(_) => {
            parent.append(new_node(arena, NodeValue::LineBreak));
        }

        Node::HtmlInline(html) => {
            parent.append(new_node(arena, NodeValue::HtmlInline(html.value.clone())));
        }
    }
}
