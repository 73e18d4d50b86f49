//! Conversion bridge between the document session and the rendering collaborators
//!
//! Two stateless operations:
//!
//! - [`parse_markdown_to_html`]: Markdown file on disk → `<div class="markdown-content">` fragment
//! - [`render_to_pdf`]: source path + rendered HTML → PDF written at a destination path
//!
//! The dispatcher only talks to the [`Converter`] trait, so hosts and tests can swap the
//! engines out. [`ConversionBridge`] is the real implementation.

use crate::error::FormatError;
use crate::formats::markdown::{read_document, render_fragment, MarkdownOptions};
use crate::formats::pdf::PdfSettings;
use std::path::Path;

/// Everything the PDF renderer needs for one export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest<'a> {
    /// Markdown file the HTML was derived from (read directly by the pandoc engine).
    pub source_path: &'a Path,
    /// Rendered `markdown-content` fragment (printed by the Chrome engine).
    pub html: &'a str,
    pub destination: &'a Path,
}

/// Markdown → HTML and HTML → PDF conversions used by the command dispatcher
pub trait Converter {
    fn to_html(&self, source_path: &Path) -> Result<String, FormatError>;

    fn to_pdf(&self, request: &RenderRequest<'_>) -> Result<(), FormatError>;
}

/// [`Converter`] backed by comrak and the configured PDF engine
#[derive(Debug, Clone, Default)]
pub struct ConversionBridge {
    markdown: MarkdownOptions,
    pdf: PdfSettings,
}

impl ConversionBridge {
    pub fn new(markdown: MarkdownOptions, pdf: PdfSettings) -> Self {
        Self { markdown, pdf }
    }

    pub fn markdown_options(&self) -> &MarkdownOptions {
        &self.markdown
    }

    pub fn pdf_settings(&self) -> &PdfSettings {
        &self.pdf
    }
}

impl Converter for ConversionBridge {
    fn to_html(&self, source_path: &Path) -> Result<String, FormatError> {
        parse_markdown_to_html(source_path, &self.markdown)
    }

    fn to_pdf(&self, request: &RenderRequest<'_>) -> Result<(), FormatError> {
        render_to_pdf(request, &self.pdf)
    }
}

/// Read a Markdown file and render it to the wrapped HTML fragment.
///
/// Unreadable files yield [`FormatError::Io`], non UTF-8 content [`FormatError::ParseError`].
pub fn parse_markdown_to_html(
    source_path: &Path,
    options: &MarkdownOptions,
) -> Result<String, FormatError> {
    let doc = read_document(source_path, options)?;
    Ok(render_fragment(&doc, options))
}

/// Render `request.html` (or `request.source_path`, for pandoc) to a PDF at `request.destination`.
#[cfg(feature = "native-export")]
pub fn render_to_pdf(request: &RenderRequest<'_>, settings: &PdfSettings) -> Result<(), FormatError> {
    use crate::formats::html::{wrap_in_document, HtmlOptions};
    use crate::formats::pdf::{render_page_to_pdf, PdfEngineKind};
    use std::fs;

    tracing::debug!(
        engine = ?settings.engine,
        destination = %request.destination.display(),
        "rendering PDF"
    );

    match settings.engine {
        PdfEngineKind::Chrome => {
            let mut options = HtmlOptions::new(settings.theme);
            if let Some(path) = &settings.stylesheet {
                let css = fs::read_to_string(path).map_err(|e| FormatError::io(path, e))?;
                options = options.with_custom_css(css);
            }
            let title = request
                .source_path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Markdown Document".to_string());
            let page = wrap_in_document(request.html, &title, &options)?;
            let bytes = render_page_to_pdf(&page, &settings.layout)?;
            fs::write(request.destination, bytes)
                .map_err(|e| FormatError::io(request.destination, e))
        }
        PdfEngineKind::Pandoc => crate::formats::pandoc::render_file_to_pdf(
            request.source_path,
            request.destination,
            settings,
        ),
    }
}

#[cfg(not(feature = "native-export"))]
pub fn render_to_pdf(
    _request: &RenderRequest<'_>,
    _settings: &PdfSettings,
) -> Result<(), FormatError> {
    Err(FormatError::NotSupported(
        "PDF export requires the native-export feature".to_string(),
    ))
}
