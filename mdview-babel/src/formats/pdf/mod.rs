//! PDF export
//!
//! Two engines are supported:
//!
//! - [`PdfEngineKind::Chrome`]: the rendered Markdown is embedded in a standalone HTML page
//!   (see the HTML format), page-layout CSS is injected, and a headless Chrome/Chromium binary
//!   prints the page to PDF. This mirrors a browser window's own print-to-PDF.
//! - [`PdfEngineKind::Pandoc`]: the Markdown source file is handed to `pandoc`, a standalone
//!   Markdown→PDF tool, together with the output path and an optional stylesheet.
//!
//! Layout options (`page-size`, `landscape`, `print-background`) apply to both engines.

#[cfg(feature = "native-export")]
mod chrome;

use crate::error::FormatError;
use crate::formats::html::HtmlTheme;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "native-export")]
pub use chrome::render_page_to_pdf;
#[cfg(feature = "native-export")]
pub use format::PdfFormat;

/// Paper sizes understood by both engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PageSize {
    A3,
    #[default]
    A4,
    A5,
    Legal,
    Letter,
    Tabloid,
}

impl PageSize {
    pub fn parse(name: &str) -> Result<Self, FormatError> {
        match name.to_ascii_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "legal" => Ok(PageSize::Legal),
            "letter" => Ok(PageSize::Letter),
            "tabloid" => Ok(PageSize::Tabloid),
            other => Err(FormatError::NotSupported(format!(
                "Unknown page size '{other}'"
            ))),
        }
    }

    /// Name as written in CSS `@page { size: … }` and passed to pandoc
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Legal => "Legal",
            PageSize::Letter => "Letter",
            PageSize::Tabloid => "Tabloid",
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which renderer produces the PDF bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfEngineKind {
    #[default]
    Chrome,
    Pandoc,
}

impl PdfEngineKind {
    pub fn parse(name: &str) -> Result<Self, FormatError> {
        match name.to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(PdfEngineKind::Chrome),
            "pandoc" => Ok(PdfEngineKind::Pandoc),
            other => Err(FormatError::NotSupported(format!(
                "Unknown PDF engine '{other}'"
            ))),
        }
    }
}

/// Page layout applied when printing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintLayout {
    pub page_size: PageSize,
    pub print_background: bool,
    pub landscape: bool,
}

impl Default for PrintLayout {
    fn default() -> Self {
        Self {
            page_size: PageSize::A4,
            print_background: true,
            landscape: false,
        }
    }
}

impl PrintLayout {
    /// CSS injected into the page before Chrome prints it
    pub fn print_css(&self) -> String {
        let orientation = if self.landscape {
            "landscape"
        } else {
            "portrait"
        };
        let mut css = format!(
            "@page {{ size: {} {orientation}; margin: 18mm; }}\nbody {{ margin: 0; }}\n",
            self.page_size
        );
        if self.print_background {
            css.push_str(
                "html, body { -webkit-print-color-adjust: exact; print-color-adjust: exact; }\n",
            );
        }
        css
    }

    /// Browser viewport matching the page orientation
    pub fn viewport(&self) -> (u32, u32) {
        if self.landscape {
            (1280, 960)
        } else {
            (960, 1280)
        }
    }
}

/// Everything needed to turn a document into PDF bytes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PdfSettings {
    pub engine: PdfEngineKind,
    pub layout: PrintLayout,
    pub theme: HtmlTheme,
    /// Extra stylesheet applied on top of the baseline CSS
    pub stylesheet: Option<PathBuf>,
}

impl PdfSettings {
    /// Overlay `--extra-*` style options on top of these settings
    pub fn with_options(mut self, options: &HashMap<String, String>) -> Result<Self, FormatError> {
        if let Some(engine) = options.get("engine") {
            self.engine = PdfEngineKind::parse(engine)?;
        }
        if let Some(size) = options.get("page-size") {
            self.layout.page_size = PageSize::parse(size)?;
        }
        self.layout.landscape = parse_bool_flag(options, "landscape", self.layout.landscape)?;
        self.layout.print_background =
            parse_bool_flag(options, "print-background", self.layout.print_background)?;
        if let Some(theme) = options.get("theme") {
            self.theme = HtmlTheme::from_name(theme);
        }
        if let Some(path) = options.get("css-path") {
            self.stylesheet = Some(PathBuf::from(path));
        }
        Ok(self)
    }
}

fn parse_bool_flag(
    options: &HashMap<String, String>,
    key: &str,
    default: bool,
) -> Result<bool, FormatError> {
    if let Some(value) = options.get(key) {
        if value.is_empty() {
            return Ok(true);
        }
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            other => Err(FormatError::NotSupported(format!(
                "Invalid boolean value '{other}' for --extra-{key}"
            ))),
        }
    } else {
        Ok(default)
    }
}

#[cfg(feature = "native-export")]
mod format {
    use super::PdfSettings;
    use crate::error::FormatError;
    use crate::format::{Document, Format, SerializedDocument};
    use crate::formats::html::{HtmlFormat, HtmlOptions};
    use crate::formats::markdown::MarkdownOptions;
    use crate::formats::pandoc;
    use std::collections::HashMap;
    use std::fs;

    /// Format implementation producing PDF bytes
    #[derive(Default)]
    pub struct PdfFormat {
        markdown: MarkdownOptions,
        settings: PdfSettings,
    }

    impl PdfFormat {
        pub fn new(markdown: MarkdownOptions, settings: PdfSettings) -> Self {
            Self { markdown, settings }
        }

        pub fn settings(&self) -> &PdfSettings {
            &self.settings
        }
    }

    impl Format for PdfFormat {
        fn name(&self) -> &str {
            "pdf"
        }

        fn description(&self) -> &str {
            "PDF export via headless Chrome or pandoc"
        }

        fn render(
            &self,
            doc: &Document,
            options: &HashMap<String, String>,
        ) -> Result<SerializedDocument, FormatError> {
            let settings = self.settings.clone().with_options(options)?;
            let bytes = match settings.engine {
                super::PdfEngineKind::Chrome => {
                    let mut html_options = HtmlOptions::new(settings.theme);
                    if let Some(path) = &settings.stylesheet {
                        let css = fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
                        html_options = html_options.with_custom_css(css);
                    }
                    let page = HtmlFormat::new(settings.theme)
                        .with_markdown_options(self.markdown.clone())
                        .render_page(doc, &html_options)?;
                    super::render_page_to_pdf(&page, &settings.layout)?
                }
                super::PdfEngineKind::Pandoc => pandoc::render_markdown_to_pdf(doc, &settings)?,
            };
            Ok(SerializedDocument::Binary(bytes))
        }
    }
}
