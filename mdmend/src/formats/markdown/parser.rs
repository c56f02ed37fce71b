//! Markdown parsing (Markdown → document tree)
//!
//! Converts CommonMark Markdown to the mdmend document tree.
//! Pipeline: Markdown string → Comrak AST → mdmend AST (with positions)

use crate::ast::{
    Blockquote, Break, CodeBlock, ColumnAlignment, Document, Emphasis, Heading, HtmlBlock,
    HtmlInline, Image, InlineCode, Link, List, ListItem, Node, Paragraph, Point, Position,
    Strikethrough, Strong, Table, TableCell, TableRow, Text, ThematicBreak,
};
use crate::error::FormatError;
use crate::formats::markdown::MarkdownExtensions;
use comrak::nodes::{AstNode, ListType, NodeValue, Sourcepos, TableAlignment};
use comrak::{parse_document, Arena, ComrakOptions};

/// Parse a Markdown string into a document tree
pub fn parse_from_markdown(
    source: &str,
    extensions: &MarkdownExtensions,
) -> Result<Document, FormatError> {
    let arena = Arena::new();
    let options = comrak_options(extensions);
    let root = parse_document(&arena, source, &options);

    let mut children = Vec::new();
    for child in root.children() {
        collect_block(child, &mut children);
    }

    let position = convert_sourcepos(root.data.borrow().sourcepos);
    Ok(Document {
        children,
        position,
    })
}

pub(crate) fn comrak_options(extensions: &MarkdownExtensions) -> ComrakOptions<'static> {
    let mut options = ComrakOptions::default();
    options.extension.table = extensions.table;
    options.extension.strikethrough = extensions.strikethrough;
    options.extension.autolink = extensions.autolink;
    options.extension.tasklist = extensions.tasklist;
    options
}

fn convert_sourcepos(sourcepos: Sourcepos) -> Option<Position> {
    // Comrak reports synthetic nodes with a zero line.
    if sourcepos.start.line == 0 || sourcepos.end.line == 0 {
        return None;
    }
    Some(Position {
        start: Point {
            line: sourcepos.start.line,
            column: sourcepos.start.column,
        },
        end: Point {
            line: sourcepos.end.line,
            column: sourcepos.end.column,
        },
    })
}

/// Map a Comrak block node onto the tree, recursing into its children
fn collect_block<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    let data = node.data.borrow();
    let position = convert_sourcepos(data.sourcepos);

    match &data.value {
        NodeValue::Paragraph => out.push(Node::Paragraph(Paragraph {
            children: collect_inlines(node),
            position,
        })),

        NodeValue::Heading(heading) => out.push(Node::Heading(Heading {
            depth: heading.level,
            children: collect_inlines(node),
            position,
        })),

        NodeValue::BlockQuote => out.push(Node::Blockquote(Blockquote {
            children: collect_blocks(node),
            position,
        })),

        NodeValue::List(list) => out.push(Node::List(List {
            ordered: matches!(list.list_type, ListType::Ordered),
            start: list.start as u32,
            children: collect_blocks(node),
            position,
        })),

        NodeValue::Item(_) => out.push(Node::ListItem(ListItem {
            checked: None,
            children: collect_blocks(node),
            position,
        })),

        NodeValue::TaskItem(check) => out.push(Node::ListItem(ListItem {
            checked: Some(check.is_some()),
            children: collect_blocks(node),
            position,
        })),

        NodeValue::CodeBlock(code_block) => {
            let language = if code_block.info.is_empty() {
                None
            } else {
                Some(code_block.info.clone())
            };
            out.push(Node::CodeBlock(CodeBlock {
                language,
                value: code_block.literal.clone(),
                position,
            }));
        }

        NodeValue::HtmlBlock(html) => out.push(Node::HtmlBlock(HtmlBlock {
            value: html.literal.clone(),
            position,
        })),

        NodeValue::ThematicBreak => {
            out.push(Node::ThematicBreak(ThematicBreak { position }));
        }

        NodeValue::Table(table) => {
            let alignments = table
                .alignments
                .iter()
                .map(|alignment| match alignment {
                    TableAlignment::Left => ColumnAlignment::Left,
                    TableAlignment::Center => ColumnAlignment::Center,
                    TableAlignment::Right => ColumnAlignment::Right,
                    TableAlignment::None => ColumnAlignment::None,
                })
                .collect();
            out.push(Node::Table(Table {
                alignments,
                children: collect_blocks(node),
                position,
            }));
        }

        NodeValue::TableRow(header) => out.push(Node::TableRow(TableRow {
            header: *header,
            children: collect_blocks(node),
            position,
        })),

        NodeValue::TableCell => out.push(Node::TableCell(TableCell {
            children: collect_inlines(node),
            position,
        })),

        NodeValue::FrontMatter(_) => {
            // Document metadata is consumed upstream of rendering.
        }

        _ => {
            // Unknown block type, skip
        }
    }
}

fn collect_blocks<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut out = Vec::new();
    for child in node.children() {
        collect_block(child, &mut out);
    }
    out
}

/// Map a Comrak inline node onto the tree
fn collect_inline<'a>(node: &'a AstNode<'a>, out: &mut Vec<Node>) {
    let data = node.data.borrow();
    let position = convert_sourcepos(data.sourcepos);

    match &data.value {
        NodeValue::Text(text) => out.push(Node::Text(Text {
            value: text.clone(),
            position,
        })),

        NodeValue::SoftBreak => out.push(Node::Text(Text {
            value: " ".to_string(),
            position,
        })),

        NodeValue::LineBreak => out.push(Node::Break(Break { position })),

        NodeValue::Code(code) => out.push(Node::InlineCode(InlineCode {
            value: code.literal.clone(),
            position,
        })),

        NodeValue::Emph => out.push(Node::Emphasis(Emphasis {
            children: collect_inlines(node),
            position,
        })),

        NodeValue::Strong => out.push(Node::Strong(Strong {
            children: collect_inlines(node),
            position,
        })),

        NodeValue::Strikethrough => out.push(Node::Strikethrough(Strikethrough {
            children: collect_inlines(node),
            position,
        })),

        NodeValue::Link(link) => out.push(Node::Link(Link {
            url: link.url.clone(),
            title: if link.title.is_empty() {
                None
            } else {
                Some(link.title.clone())
            },
            children: collect_inlines(node),
            position,
        })),

        NodeValue::Image(link) => {
            let mut alt = String::new();
            collect_text_content(node, &mut alt);
            out.push(Node::Image(Image {
                url: link.url.clone(),
                title: if link.title.is_empty() {
                    None
                } else {
                    Some(link.title.clone())
                },
                alt,
                position,
            }));
        }

        NodeValue::HtmlInline(html) => out.push(Node::HtmlInline(HtmlInline {
            value: html.clone(),
            position,
        })),

        _ => {
            // Skip unknown inline types
        }
    }
}

fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Node> {
    let mut out = Vec::new();
    for child in node.children() {
        collect_inline(child, &mut out);
    }
    out
}

/// Collect text content from a node (for extracting image alt text)
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => output.push_str(text),
            NodeValue::Code(code) => output.push_str(&code.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
            _ => collect_text_content(child, output),
        }
    }
}
