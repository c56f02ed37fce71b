//! Markdown repair and rendering for fragmented documents
//!
//!     This crate parses Markdown into an owned document tree, repairs
//!     paragraph-level fragmentation artifacts, and renders the result to
//!     HTML or CommonMark through a uniform formats interface.
//!
//!     TLDR: parse with the markdown format, run the standard transform
//!     pipeline, serialize with any registered format. The convenience
//!     entry points in [`transforms`] do all three in one call.
//!
//! Architecture
//!
//!     The central type is the document tree (./ast/mod.rs): an owned,
//!     mdast-shaped representation with optional source positions. Formats
//!     convert between source text and the tree; transforms rewrite the
//!     tree in place between the two. Keeping the tree owned (rather than
//!     working on comrak's arena AST directly) is what lets transforms
//!     splice, remove, and reorder children with plain `Vec` operations.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── ast                     # The document tree
//!     ├── transforms              # Transform trait, Pipeline, merge core
//!     ├── formats
//!     │   ├── markdown            # comrak-backed parse + serialize
//!     │   ├── html                # comrak-backed HTML export
//!     │   ├── treeviz             # tree visualization for inspection
//!     │   └── icons.rs
//!     └── lib.rs
//!
//! The Merge Core
//!
//!     The most interesting part of the work is the paragraph merge
//!     transform (./transforms/merge.rs). Upstream producers split single
//!     authored paragraphs into several paragraph nodes - a lone inline
//!     code span, a stray `)`, a sentence continuing after a single
//!     newline. The transform repairs these in three passes over the tree;
//!     see the module documentation for the full algorithm.
//!
//! Library Choices
//!
//!     Format handling is offloaded to comrak: we never hand-write a
//!     Markdown parser or HTML emitter, we adapt comrak's AST to ours and
//!     back. The tree derives serde's Serialize so inspection tooling can
//!     dump it as JSON without bespoke writers.

pub mod ast;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod transforms;

pub use ast::{Document, Node};
pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
pub use transforms::{merge_inline_fragments, Pipeline, Transform};
