//! Core data structures for the document tree.

use serde::Serialize;

/// A line/column pair in the source document (both 1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

/// The source range a node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub start: Point,
    pub end: Point,
}

impl Position {
    pub fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Position {
            start: Point {
                line: start_line,
                column: start_column,
            },
            end: Point {
                line: end_line,
                column: end_column,
            },
        }
    }
}

/// Represents the root of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Document {
    pub fn with_children(children: Vec<Node>) -> Self {
        Document {
            children,
            position: None,
        }
    }
}

/// A single node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    Heading(Heading),
    Paragraph(Paragraph),
    Blockquote(Blockquote),
    List(List),
    ListItem(ListItem),
    CodeBlock(CodeBlock),
    ThematicBreak(ThematicBreak),
    HtmlBlock(HtmlBlock),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
    Text(Text),
    InlineCode(InlineCode),
    Emphasis(Emphasis),
    Strong(Strong),
    Strikethrough(Strikethrough),
    Link(Link),
    Image(Image),
    Break(Break),
    HtmlInline(HtmlInline),
}

/// Represents a heading with a depth of 1-6.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub depth: u8,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a block quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blockquote {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents an ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub start: u32,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents an item in a list. `checked` is set for task-list items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a fenced or indented code block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a thematic break (`---`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThematicBreak {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a raw HTML block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlBlock {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    Left,
    Center,
    Right,
    None,
}

/// Represents a table. Children are table rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub alignments: Vec<ColumnAlignment>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a table row. Children are table cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub header: bool,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Represents a table cell of inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Plain text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Inline code (`` `code` ``).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InlineCode {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Emphasized content (`*text*`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Strong content (`**text**`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strong {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Struck-through content (`~~text~~`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strikethrough {
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A hyperlink with inline content as its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// A hard line break.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Break {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

/// Raw inline HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlInline {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Node {
    /// The node's type name, used by the tree visualization formats.
    pub fn node_type(&self) -> &'static str {
        match self {
            Node::Heading(_) => "Heading",
            Node::Paragraph(_) => "Paragraph",
            Node::Blockquote(_) => "Blockquote",
            Node::List(_) => "List",
            Node::ListItem(_) => "ListItem",
            Node::CodeBlock(_) => "CodeBlock",
            Node::ThematicBreak(_) => "ThematicBreak",
            Node::HtmlBlock(_) => "HtmlBlock",
            Node::Table(_) => "Table",
            Node::TableRow(_) => "TableRow",
            Node::TableCell(_) => "TableCell",
            Node::Text(_) => "Text",
            Node::InlineCode(_) => "InlineCode",
            Node::Emphasis(_) => "Emphasis",
            Node::Strong(_) => "Strong",
            Node::Strikethrough(_) => "Strikethrough",
            Node::Link(_) => "Link",
            Node::Image(_) => "Image",
            Node::Break(_) => "Break",
            Node::HtmlInline(_) => "HtmlInline",
        }
    }

    /// Whether this node is a leaf-level inline node (carries no block
    /// structure).
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            Node::Text(_)
                | Node::InlineCode(_)
                | Node::Emphasis(_)
                | Node::Strong(_)
                | Node::Strikethrough(_)
                | Node::Link(_)
                | Node::Image(_)
                | Node::Break(_)
                | Node::HtmlInline(_)
        )
    }

    /// Borrow the node's ordered children, if it has any.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Heading(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Strikethrough(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            _ => None,
        }
    }

    /// Mutably borrow the node's ordered children, if it has any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Heading(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Strikethrough(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Borrow the node's source position, if known.
    pub fn position(&self) -> Option<&Position> {
        match self {
            Node::Heading(n) => n.position.as_ref(),
            Node::Paragraph(n) => n.position.as_ref(),
            Node::Blockquote(n) => n.position.as_ref(),
            Node::List(n) => n.position.as_ref(),
            Node::ListItem(n) => n.position.as_ref(),
            Node::CodeBlock(n) => n.position.as_ref(),
            Node::ThematicBreak(n) => n.position.as_ref(),
            Node::HtmlBlock(n) => n.position.as_ref(),
            Node::Table(n) => n.position.as_ref(),
            Node::TableRow(n) => n.position.as_ref(),
            Node::TableCell(n) => n.position.as_ref(),
            Node::Text(n) => n.position.as_ref(),
            Node::InlineCode(n) => n.position.as_ref(),
            Node::Emphasis(n) => n.position.as_ref(),
            Node::Strong(n) => n.position.as_ref(),
            Node::Strikethrough(n) => n.position.as_ref(),
            Node::Link(n) => n.position.as_ref(),
            Node::Image(n) => n.position.as_ref(),
            Node::Break(n) => n.position.as_ref(),
            Node::HtmlInline(n) => n.position.as_ref(),
        }
    }

    /// Extend the node's recorded end position. No-op when the node has no
    /// position of its own.
    pub fn extend_position_end(&mut self, end: Point) {
        let position = match self {
            Node::Heading(n) => &mut n.position,
            Node::Paragraph(n) => &mut n.position,
            Node::Blockquote(n) => &mut n.position,
            Node::List(n) => &mut n.position,
            Node::ListItem(n) => &mut n.position,
            Node::CodeBlock(n) => &mut n.position,
            Node::ThematicBreak(n) => &mut n.position,
            Node::HtmlBlock(n) => &mut n.position,
            Node::Table(n) => &mut n.position,
            Node::TableRow(n) => &mut n.position,
            Node::TableCell(n) => &mut n.position,
            Node::Text(n) => &mut n.position,
            Node::InlineCode(n) => &mut n.position,
            Node::Emphasis(n) => &mut n.position,
            Node::Strong(n) => &mut n.position,
            Node::Strikethrough(n) => &mut n.position,
            Node::Link(n) => &mut n.position,
            Node::Image(n) => &mut n.position,
            Node::Break(n) => &mut n.position,
            Node::HtmlInline(n) => &mut n.position,
        };
        if let Some(pos) = position.as_mut() {
            if end.line > pos.end.line || (end.line == pos.end.line && end.column > pos.end.column)
            {
                pos.end = end;
            }
        }
    }

    /// Collect the plain text carried by this node and its descendants.
    ///
    /// Text and inline-code values are concatenated in order; hard breaks
    /// and non-textual inlines contribute nothing.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_plain_text(&mut out);
        out
    }

    fn collect_plain_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.value),
            Node::InlineCode(c) => out.push_str(&c.value),
            Node::CodeBlock(c) => out.push_str(&c.value),
            Node::Break(_) | Node::HtmlInline(_) | Node::HtmlBlock(_) => {}
            _ => {
                if let Some(children) = self.children() {
                    for child in children {
                        child.collect_plain_text(out);
                    }
                }
            }
        }
    }
}

/// Collect the plain text of an inline sequence (see [`Node::plain_text`]).
pub fn plain_text_of(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.collect_plain_text(&mut out);
    }
    out
}
