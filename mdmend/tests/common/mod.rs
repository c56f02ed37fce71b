//! Shared helpers for the integration suites.

use mdmend::ast::Document;
use mdmend::format::Format;
use mdmend::formats::markdown::MarkdownFormat;
use once_cell::sync::Lazy;
use std::path::PathBuf;

/// The kitchensink fixture, read once for the whole suite.
pub static KITCHENSINK: Lazy<String> = Lazy::new(|| load_fixture("kitchensink.md"));

/// Parse Markdown source into a document tree with default extensions.
pub fn md_to_doc(md: &str) -> Document {
    MarkdownFormat::default()
        .parse(md)
        .expect("Should parse markdown")
}

/// Read a fixture from tests/fixtures/.
pub fn load_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"))
}
