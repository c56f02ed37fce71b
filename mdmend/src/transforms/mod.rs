//! Tree transforms and the pipeline that hosts them.
//!
//! Transforms run between parsing and serialization: the parser produces a
//! [`Document`], each transform mutates it in place, and the renderer
//! consumes the result. The [`Pipeline`] keeps transforms ordered and is
//! the single hook formats and the CLI use to plug repairs into a render.

pub mod merge;

pub use merge::{merge_inline_fragments, MergeInlineFragments};

use crate::ast::Document;
use crate::error::FormatError;
use crate::formats::html::{serialize_to_html, HtmlOptions};
use crate::formats::markdown::{parser, serializer, MarkdownExtensions};

/// An in-place rewrite of a parsed document tree.
pub trait Transform: Send + Sync {
    /// Stable name used by the CLI to list and select transforms.
    fn name(&self) -> &str;

    /// Mutates the document in place. Transforms do not fail; unexpected
    /// shapes are left untouched.
    fn apply(&self, doc: &mut Document);
}

/// An ordered list of transforms applied between parse and serialize.
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// A pipeline with no transforms (parse output passes through as-is).
    pub fn empty() -> Self {
        Pipeline {
            transforms: Vec::new(),
        }
    }

    /// The standard repair pipeline: paragraph fragment merging.
    pub fn standard() -> Self {
        let mut pipeline = Pipeline::empty();
        pipeline.push(MergeInlineFragments);
        pipeline
    }

    /// Appends a transform to the end of the pipeline.
    pub fn push<T: Transform + 'static>(&mut self, transform: T) {
        self.transforms.push(Box::new(transform));
    }

    /// Runs every transform, in order, over the document.
    pub fn run(&self, doc: &mut Document) {
        for transform in &self.transforms {
            transform.apply(doc);
        }
    }

    /// Names of the contained transforms, in execution order.
    pub fn names(&self) -> Vec<&str> {
        self.transforms.iter().map(|t| t.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::standard()
    }
}

/// Parses markdown, runs the standard repair pipeline, and renders HTML.
pub fn render_to_html(source: &str) -> Result<String, FormatError> {
    let extensions = MarkdownExtensions::default();
    let mut doc = parser::parse_from_markdown(source, &extensions)?;
    Pipeline::standard().run(&mut doc);
    serialize_to_html(&doc, &extensions, &HtmlOptions::default())
}

/// Parses markdown, runs the standard repair pipeline, and re-serializes
/// CommonMark. Useful for normalizing fragmented documents in place.
pub fn render_to_markdown(source: &str) -> Result<String, FormatError> {
    let extensions = MarkdownExtensions::default();
    let mut doc = parser::parse_from_markdown(source, &extensions)?;
    Pipeline::standard().run(&mut doc);
    serializer::serialize_to_markdown(&doc, &extensions)
}
