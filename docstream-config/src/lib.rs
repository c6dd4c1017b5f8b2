//! Shared configuration loader for the docstream toolchain.
//!
//! `defaults/docstream.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`DocstreamConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use docstream_babel::common::flat_to_requests::GenerateOptions;
use docstream_babel::common::links::LinkResolver;
use docstream_babel::common::style_map::StyleMapper;
use docstream_babel::ir::style::{RgbColor, TextStyle};
use docstream_babel::transforms::CompileOptions;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/docstream.default.toml");

/// Top-level configuration consumed by docstream applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DocstreamConfig {
    pub convert: ConvertConfig,
    #[serde(default)]
    pub styles: StylesConfig,
    pub inspect: InspectConfig,
}

impl DocstreamConfig {
    /// Style table with every configured override and the link base applied.
    pub fn style_mapper(&self) -> StyleMapper {
        let links = match &self.convert.base_url {
            Some(base) => LinkResolver::with_base(base),
            None => LinkResolver::new(),
        };
        self.styles
            .overrides
            .iter()
            .fold(StyleMapper::new().with_links(links), |mapper, (tag, style)| {
                mapper.with_override(tag, style.into())
            })
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions::from(&self.convert)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            styles: self.style_mapper(),
            generate: self.generate_options(),
        }
    }

    /// Serializer options derived from the convert section.
    pub fn format_options(&self) -> HashMap<String, String> {
        let mut options = HashMap::new();
        if let Some(id) = &self.convert.document_id {
            options.insert("document-id".to_string(), id.clone());
        }
        options
    }
}

/// Knobs of the request generator and the docs-json output.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub indent_per_level: f64,
    pub coalesce_inserts: bool,
    #[serde(default)]
    pub document_id: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl From<&ConvertConfig> for GenerateOptions {
    fn from(config: &ConvertConfig) -> Self {
        GenerateOptions {
            indent_per_level: config.indent_per_level,
            coalesce_inserts: config.coalesce_inserts,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StylesConfig {
    #[serde(default)]
    pub overrides: BTreeMap<String, StyleOverride>,
}

/// One `[styles.overrides.<tag>]` table. Unset keys leave the computed style
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StyleOverride {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strikethrough: Option<bool>,
    pub link: Option<String>,
    /// `#rrggbb` or `#rgb`; other values are ignored.
    pub color: Option<String>,
}

impl From<&StyleOverride> for TextStyle {
    fn from(config: &StyleOverride) -> Self {
        TextStyle {
            bold: config.bold,
            italic: config.italic,
            underline: config.underline,
            strikethrough: config.strikethrough,
            link: config.link.clone(),
            foreground: config.color.as_deref().and_then(RgbColor::from_hex),
        }
    }
}

/// Controls `docstream inspect`.
#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub default_transform: String,
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
    pub fn build(self) -> Result<DocstreamConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DocstreamConfig, ConfigError> {
    Loader::new().build()
}
