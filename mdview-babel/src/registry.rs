//! Formats known to `mdview convert`
//!
//! Markdown is the single input. Everything else is an output target rendered from the
//! [`Document`] the Markdown reader produces. All formats in one registry share the same
//! Markdown extensions and PDF settings, so a page and a PDF built from one registry look alike.

use crate::error::FormatError;
use crate::format::{Document, Format, SerializedDocument};
use crate::formats::html::{HtmlFormat, HtmlFragmentFormat};
use crate::formats::markdown::{read_document, MarkdownFormat};
use crate::formats::{MarkdownOptions, PdfSettings};
use std::collections::HashMap;
use std::path::Path;

pub struct FormatRegistry {
    reader: MarkdownFormat,
    /// Output targets in listing order.
    targets: Vec<Box<dyn Format>>,
}

impl FormatRegistry {
    /// Build the reader and every output target from one set of settings.
    #[cfg_attr(not(feature = "native-export"), allow(unused_variables))]
    pub fn with_settings(markdown: MarkdownOptions, pdf: PdfSettings) -> Self {
        let mut targets: Vec<Box<dyn Format>> = vec![
            Box::new(HtmlFormat::new(pdf.theme).with_markdown_options(markdown.clone())),
            Box::new(HtmlFragmentFormat::new(markdown.clone())),
        ];
        #[cfg(feature = "native-export")]
        targets.push(Box::new(crate::formats::pdf::PdfFormat::new(
            markdown.clone(),
            pdf,
        )));

        Self {
            reader: MarkdownFormat::new(markdown),
            targets,
        }
    }

    pub fn with_defaults() -> Self {
        Self::with_settings(MarkdownOptions::default(), PdfSettings::default())
    }

    /// The Markdown reader followed by the output targets
    pub fn formats(&self) -> impl Iterator<Item = &dyn Format> + '_ {
        std::iter::once(&self.reader as &dyn Format).chain(self.targets.iter().map(|t| t.as_ref()))
    }

    /// Look up an output target by name.
    pub fn target(&self, name: &str) -> Result<&dyn Format, FormatError> {
        if let Some(target) = self.targets.iter().find(|t| t.name() == name) {
            return Ok(target.as_ref());
        }
        if name == self.reader.name() {
            return Err(FormatError::NotSupported(format!(
                "Format '{name}' can only be read"
            )));
        }
        Err(FormatError::FormatNotFound(name.to_string()))
    }

    /// Input format implied by the file extension of `path`.
    pub fn detect_input(&self, path: &Path) -> Option<&str> {
        let extension = path.extension()?.to_str()?;
        MarkdownFormat::EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
            .then(|| self.reader.name())
    }

    /// Read `path` as `format`, which must name the Markdown reader.
    pub fn read(&self, path: &Path, format: &str) -> Result<Document, FormatError> {
        if format != self.reader.name() {
            return match self.target(format) {
                Ok(_) => Err(FormatError::NotSupported(format!(
                    "Format '{format}' cannot be read"
                ))),
                Err(err) => Err(err),
            };
        }
        read_document(path, self.reader.options())
    }

    /// Render `doc` through the output target `name`.
    pub fn render(
        &self,
        doc: &Document,
        name: &str,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        self.target(name)?.render(doc, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
