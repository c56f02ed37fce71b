//! Markdown format implementation
//!
//! This module implements bidirectional conversion between the mdmend
//! document tree and CommonMark Markdown.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and serialization. This
//! choice is based on:
//! - Single crate for both parsing and serialization
//! - Feature-rich with CommonMark compliance
//! - Robust and well-maintained
//! - Supports extensions (tables, strikethrough, etc.)
//! - Carries source positions for every node, which the repair transforms
//!   need for line-adjacency decisions
//!
//! # Architecture Notes
//!
//! Comrak's arena-allocated AST is only borrowed for the duration of a
//! parse or serialize call; the owned mdmend tree is what transforms
//! operate on. The parser walks the comrak AST once and maps each node,
//! carrying positions over. The serializer rebuilds a comrak AST from the
//! tree and lets comrak's own CommonMark writer produce the output.
//! Unknown comrak node kinds are skipped in both directions.

pub mod parser;
pub mod serializer;

use crate::ast::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Toggles for comrak's CommonMark extensions.
#[derive(Debug, Clone)]
pub struct MarkdownExtensions {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl Default for MarkdownExtensions {
    fn default() -> Self {
        MarkdownExtensions {
            table: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
        }
    }
}

/// Format implementation for Markdown
#[derive(Default)]
pub struct MarkdownFormat {
    pub extensions: MarkdownExtensions,
}

impl MarkdownFormat {
    pub fn new(extensions: MarkdownExtensions) -> Self {
        MarkdownFormat { extensions }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_markdown(source, &self.extensions)
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc, &self.extensions)
    }
}
