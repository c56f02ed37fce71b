//! HTML format implementation (document tree → HTML export)
//!
//! Serialize-only format: the document tree is rebuilt as a Comrak AST and
//! rendered through comrak's HTML writer. Raw HTML carried in the tree is
//! escaped unless explicitly allowed.

use crate::ast::{Document, Node};
use crate::error::FormatError;
use crate::format::Format;
use crate::formats::markdown::parser::comrak_options;
use crate::formats::markdown::serializer::build_comrak_ast;
use crate::formats::markdown::MarkdownExtensions;
use comrak::{format_html, Arena};

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Wrap the rendered body in a complete HTML document
    pub full_page: bool,
    /// Pass raw HTML blocks/inlines through instead of escaping them
    pub allow_raw_html: bool,
}

/// Serialize a document tree to HTML
pub fn serialize_to_html(
    doc: &Document,
    extensions: &MarkdownExtensions,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let arena = Arena::new();
    let root = build_comrak_ast(&arena, doc);

    let mut comrak_opts = comrak_options(extensions);
    comrak_opts.render.unsafe_ = options.allow_raw_html;

    let mut output = Vec::new();
    format_html(root, &comrak_opts, &mut output).map_err(|e| {
        FormatError::SerializationError(format!("Comrak HTML rendering failed: {e}"))
    })?;

    let body = String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))?;

    if options.full_page {
        Ok(wrap_in_document(&body, &document_title(doc)))
    } else {
        Ok(body)
    }
}

/// Derive a page title from the document's first heading
fn document_title(doc: &Document) -> String {
    for child in &doc.children {
        if let Node::Heading(heading) = child {
            let title = child.plain_text();
            let title = title.trim();
            if heading.depth >= 1 && !title.is_empty() {
                return title.to_string();
            }
        }
    }
    "Document".to_string()
}

fn wrap_in_document(body: &str, title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_text(title),
        body
    )
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format implementation for HTML (export only)
#[derive(Default)]
pub struct HtmlFormat {
    pub extensions: MarkdownExtensions,
    pub options: HtmlOptions,
}

impl HtmlFormat {
    pub fn new(extensions: MarkdownExtensions, options: HtmlOptions) -> Self {
        HtmlFormat {
            extensions,
            options,
        }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML rendering of the document tree"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serialize_to_html(doc, &self.extensions, &self.options)
    }
}
