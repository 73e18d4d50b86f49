//! Shared configuration loader for mdview.
//!
//! `defaults/mdview.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MdviewConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use mdview_babel::formats::markdown::MarkdownOptions;
use mdview_babel::formats::pdf::{PageSize, PdfEngineKind, PdfSettings, PrintLayout};
use mdview_babel::formats::HtmlTheme;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/mdview.default.toml");

/// Environment variable selecting the display content source.
pub const ENV_VAR: &str = "MDVIEW_ENV";

/// Top-level configuration consumed by mdview applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MdviewConfig {
    pub display: DisplayConfig,
    pub markdown: MarkdownConfig,
    pub export: ExportConfig,
}

/// Where the display process loads its UI from.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub environment: String,
    pub dev_url: String,
    pub bundle: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplaySource {
    /// Live development server.
    DevServer(String),
    /// Packaged UI bundle on disk.
    Bundle(PathBuf),
}

impl DisplayConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn source(&self) -> DisplaySource {
        if self.is_development() {
            DisplaySource::DevServer(self.dev_url.clone())
        } else {
            DisplaySource::Bundle(self.bundle.clone())
        }
    }
}

/// Mirrors the Markdown extensions exposed by the renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
    pub footnotes: bool,
    pub superscript: bool,
    pub smart_punctuation: bool,
    pub front_matter: bool,
    pub raw_html: bool,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions {
            tables: config.tables,
            strikethrough: config.strikethrough,
            autolink: config.autolink,
            tasklist: config.tasklist,
            footnotes: config.footnotes,
            superscript: config.superscript,
            smart_punctuation: config.smart_punctuation,
            front_matter: config.front_matter,
            raw_html: config.raw_html,
        }
    }
}

/// PDF export knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    pub engine: PdfEngineKind,
    pub theme: HtmlTheme,
    #[serde(default)]
    pub stylesheet: Option<PathBuf>,
    pub pdf: PdfConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub page_size: PageSize,
    pub print_background: bool,
    pub landscape: bool,
}

impl From<&ExportConfig> for PdfSettings {
    fn from(config: &ExportConfig) -> Self {
        PdfSettings {
            engine: config.engine,
            layout: PrintLayout {
                page_size: config.pdf.page_size,
                print_background: config.pdf.print_background,
                landscape: config.pdf.landscape,
            },
            theme: config.theme,
            stylesheet: config.stylesheet.clone(),
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

    /// Honour `MDVIEW_ENV` when it is set.
    pub fn with_environment(self) -> Result<Self, ConfigError> {
        let value = std::env::var(ENV_VAR).ok();
        self.with_environment_value(value.as_deref())
    }

    /// Select the display environment explicitly; `None` keeps the layered value.
    pub fn with_environment_value(self, value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(env) => self.set_override("display.environment", env),
            None => Ok(self),
        }
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MdviewConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MdviewConfig, ConfigError> {
    Loader::new().build()
}
