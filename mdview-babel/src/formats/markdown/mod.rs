//! Markdown format implementation
//!
//! Markdown is the only input format. Parsing produces a [`Document`] holding the source and
//! its title; rendering to HTML is delegated entirely to `comrak`.
//!
//! # Library Choice
//!
//! We use the `comrak` crate for Markdown parsing and rendering:
//! - CommonMark compliant, with GitHub-flavoured extensions
//! - Renders HTML directly, so no HTML is assembled by hand here
//! - Robust against malformed input, which is trusted and never validated
//!
//! # Rendered Fragment
//!
//! [`render_fragment`] produces the markup pushed to the display process:
//!
//! ```text
//! <div class="markdown-content">…comrak output…</div>
//! ```
//!
//! The trailing newline comrak emits after the last block is trimmed so the container closes
//! directly after the content.

pub mod parser;

use crate::format::{Document, Format, Role};
use comrak::ComrakOptions;
use serde::Deserialize;

pub use parser::{parse_from_markdown, read_document, render_fragment};

/// Class of the element wrapping every rendered fragment.
pub const CONTAINER_CLASS: &str = "markdown-content";

/// Markdown extensions enabled when rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklist: bool,
    pub footnotes: bool,
    pub superscript: bool,
    pub smart_punctuation: bool,
    /// Strip a leading `---` front matter block.
    pub front_matter: bool,
    /// Pass raw HTML in the source through to the output.
    pub raw_html: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklist: true,
            footnotes: true,
            superscript: false,
            smart_punctuation: false,
            front_matter: true,
            raw_html: true,
        }
    }
}

impl MarkdownOptions {
    pub(crate) fn comrak_options(&self) -> ComrakOptions<'static> {
        let mut options = ComrakOptions::default();
        options.extension.table = self.tables;
        options.extension.strikethrough = self.strikethrough;
        options.extension.autolink = self.autolink;
        options.extension.tasklist = self.tasklist;
        options.extension.footnotes = self.footnotes;
        options.extension.superscript = self.superscript;
        if self.front_matter {
            options.extension.front_matter_delimiter = Some("---".to_string());
        }
        options.parse.smart = self.smart_punctuation;
        options.render.unsafe_ = self.raw_html;
        options
    }
}

/// Format implementation for Markdown
#[derive(Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    /// File extensions read as Markdown, compared case-insensitively
    pub const EXTENSIONS: &'static [&'static str] = &["md", "markdown"];

    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    pub fn parse(&self, source: &str) -> Document {
        parse_from_markdown(source, &self.options)
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown with GitHub extensions"
    }

    fn role(&self) -> Role {
        Role::Input
    }
}
