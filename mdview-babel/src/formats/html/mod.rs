//! HTML format implementation
//!
//! Two HTML outputs are produced from a Markdown [`Document`]:
//!
//! - `html-fragment`: the `<div class="markdown-content">` container pushed to the display
//!   process, exactly as the conversion bridge hands it over.
//! - `html`: a standalone, self-contained HTML5 page embedding that container together with
//!   the baseline stylesheet, the selected theme and any custom CSS. PDF export prints this page.
//!
//! # Library Choice
//!
//! Markdown rendering belongs to `comrak` (see the markdown format). Before a fragment is
//! embedded in a page it is normalized through `html5ever` + `markup5ever_rcdom`, so raw HTML
//! carried over from the Markdown source cannot leave unbalanced tags in the page template.
//!
//! # CSS and Theming
//!
//! Standalone pages embed CSS from:
//! - `css/baseline.css`: reset + default presentation of `.markdown-content` (always included)
//! - `css/themes/theme-*.css`: optional overrides layered on top of the baseline
//! - custom CSS supplied via the `css-path` option, appended last

mod serializer;

use crate::error::FormatError;
use crate::format::{reject_unknown_options, Document, Format, SerializedDocument};
use crate::formats::markdown::{render_fragment, MarkdownOptions};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;

pub use serializer::{
    get_default_css, normalize_fragment, serialize_to_html_with_options,
    HtmlOptions,
};
pub(crate) use serializer::wrap_in_document;

/// Available CSS themes for HTML export
///
/// Config files and `--extra-theme` share [`HtmlTheme::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum HtmlTheme {
    /// Baseline modern theme (no-op; relies on baseline.css)
    #[default]
    Modern,
    /// Serif typography override
    Serif,
}

impl HtmlTheme {
    /// Parse a theme name, falling back to [`HtmlTheme::Modern`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "serif" | "fancy-serif" => HtmlTheme::Serif,
            _ => HtmlTheme::Modern,
        }
    }
}

impl From<String> for HtmlTheme {
    fn from(name: String) -> Self {
        HtmlTheme::from_name(&name)
    }
}

/// Format implementation for standalone HTML pages
#[derive(Default)]
pub struct HtmlFormat {
    theme: HtmlTheme,
    markdown: MarkdownOptions,
}

impl HtmlFormat {
    /// Create a new HTML format with the specified theme
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            markdown: MarkdownOptions::default(),
        }
    }

    /// Use the given Markdown extensions when rendering
    pub fn with_markdown_options(mut self, markdown: MarkdownOptions) -> Self {
        self.markdown = markdown;
        self
    }

    pub(crate) fn options_from(
        &self,
        options: &HashMap<String, String>,
    ) -> Result<HtmlOptions, FormatError> {
        let theme = options
            .get("theme")
            .map(|name| HtmlTheme::from_name(name))
            .unwrap_or(self.theme);
        let mut html_options = HtmlOptions::new(theme);
        if let Some(path) = options.get("css-path") {
            let css = fs::read_to_string(path)
                .map_err(|e| FormatError::io(std::path::Path::new(path), e))?;
            html_options = html_options.with_custom_css(css);
        }
        Ok(html_options)
    }

    /// Render a document into a standalone page
    pub fn render_page(
        &self,
        doc: &Document,
        options: &HtmlOptions,
    ) -> Result<String, FormatError> {
        serialize_to_html_with_options(doc, &self.markdown, options)
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Standalone HTML5 page with embedded CSS"
    }

    /// Reads `theme` and `css-path`; other keys are left to other formats.
    fn render(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let html_options = self.options_from(options)?;
        self.render_page(doc, &html_options)
            .map(SerializedDocument::Text)
    }
}

/// Format implementation for the bare `markdown-content` container
#[derive(Default)]
pub struct HtmlFragmentFormat {
    markdown: MarkdownOptions,
}

impl HtmlFragmentFormat {
    pub fn new(markdown: MarkdownOptions) -> Self {
        Self { markdown }
    }
}

impl Format for HtmlFragmentFormat {
    fn name(&self) -> &str {
        "html-fragment"
    }

    fn description(&self) -> &str {
        "Rendered Markdown wrapped in a markdown-content container"
    }

    /// The fragment is exactly what the display receives, so it takes no options.
    fn render(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        reject_unknown_options(self.name(), options, &[])?;
        Ok(SerializedDocument::Text(render_fragment(doc, &self.markdown)))
    }
}
