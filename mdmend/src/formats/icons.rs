//! Shared icon mapping for tree visualization formats
//!
//! Centralized so every tree-based inspection output names node types the
//! same way.

/// Get the Unicode icon for a given AST node type
///
/// Returns a single Unicode character that visually represents the node
/// type, used by the tree visualization format for quick identification.
pub fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Heading" => "§",
        "Paragraph" => "¶",
        "Blockquote" => "❝",
        "List" => "☰",
        "ListItem" => "•",
        "CodeBlock" => "𝒱",
        "ThematicBreak" => "⎯",
        "HtmlBlock" => "⌗",
        "Table" => "▦",
        "TableRow" => "─",
        "TableCell" => "□",
        "Text" => "◦",
        "InlineCode" => "ƒ",
        "Emphasis" => "𝐼",
        "Strong" => "𝐁",
        "Strikethrough" => "∼",
        "Link" => "⊕",
        "Image" => "▣",
        "Break" => "↵",
        "HtmlInline" => "⌗",
        _ => "○",
    }
}
