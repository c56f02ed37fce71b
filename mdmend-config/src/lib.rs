//! Shared configuration loader for the mdmend toolchain.
//!
//! `defaults/mdmend.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files
//! on top of those defaults via [`Loader`] before deserializing into
//! [`MendConfig`].
//!
//! Note that the merge transform's heuristics (conjunction words, spacing
//! punctuation, line-gap threshold) are deliberately not configurable: they
//! are tuned constants, and changing them changes rendering output for real
//! content.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdmend::formats::html::HtmlOptions;
use mdmend::formats::markdown::MarkdownExtensions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/mdmend.default.toml");

/// Top-level configuration consumed by mdmend applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MendConfig {
    pub markdown: MarkdownConfig,
    pub transforms: TransformsConfig,
    pub inspect: InspectConfig,
    pub convert: ConvertConfig,
}

/// Markdown parsing configuration groups.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub extensions: MarkdownExtensionsConfig,
}

/// Mirrors the comrak extension toggles exposed by the library.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownExtensionsConfig {
    pub table: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
}

impl From<MarkdownExtensionsConfig> for MarkdownExtensions {
    fn from(config: MarkdownExtensionsConfig) -> Self {
        MarkdownExtensions {
            table: config.table,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

impl From<&MarkdownExtensionsConfig> for MarkdownExtensions {
    fn from(config: &MarkdownExtensionsConfig) -> Self {
        MarkdownExtensions {
            table: config.table,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
        }
    }
}

/// Controls which transforms run between parse and serialize.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformsConfig {
    pub merge_fragments: bool,
}

/// Controls AST-related inspect output.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub ast: InspectAstConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectAstConfig {
    pub show_line_numbers: bool,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub full_page: bool,
    pub allow_raw_html: bool,
}

impl From<&HtmlConfig> for HtmlOptions {
    fn from(config: &HtmlConfig) -> Self {
        HtmlOptions {
            full_page: config.full_page,
            allow_raw_html: config.allow_raw_html,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MendConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MendConfig, ConfigError> {
    Loader::new().build()
}
