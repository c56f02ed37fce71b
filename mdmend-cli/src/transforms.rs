//! CLI-specific inspect transforms
//!
//! This module defines the inspect outputs available in the CLI. Each
//! transform renders the parsed (and, unless `--raw` is given, repaired)
//! document tree in a different representation:
//!
//! - `ast-treeviz`: tree visualization with Unicode icons (default)
//! - `ast-json`: the tree as pretty-printed JSON
//!
//! Inspecting with and without `--raw` is the quickest way to see what the
//! fragment repair changed in a document.

use mdmend::ast::Document;
use mdmend::error::FormatError;
use mdmend::formats::treeviz::to_treeviz_str;
use mdmend_config::MendConfig;

/// All available CLI inspect transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ast-treeviz", "ast-json"];

/// Render the document tree with the named transform
pub fn execute_transform(
    doc: &Document,
    transform: &str,
    config: &MendConfig,
) -> Result<String, FormatError> {
    match transform {
        "ast-treeviz" => Ok(to_treeviz_str(doc, config.inspect.ast.show_line_numbers)),
        "ast-json" => {
            let json = serde_json::to_string_pretty(doc).map_err(|e| {
                FormatError::SerializationError(format!("JSON serialization failed: {e}"))
            })?;
            Ok(format!("{json}\n"))
        }
        other => Err(FormatError::NotSupported(format!(
            "Unknown inspect transform '{other}'"
        ))),
    }
}
