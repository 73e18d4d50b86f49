//! Documents and the formats that read or render them
//!
//! mdview reads exactly one format, Markdown, and renders a [`Document`] to one of several
//! outputs. A [`Format`] says which of the two it does through [`Format::role`].

use crate::error::FormatError;
use std::collections::HashMap;
use std::path::PathBuf;

/// A Markdown document ready for conversion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Raw Markdown source.
    pub source: String,
    /// Text of the first level-1 heading, used as the title of standalone output.
    pub title: Option<String>,
    /// File the source was read from, if any.
    pub origin: Option<PathBuf>,
}

impl Document {
    /// Title for standalone output: the first heading, else the file stem.
    pub fn display_title(&self) -> String {
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }
        self.origin
            .as_deref()
            .and_then(|p| p.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Markdown Document".to_string())
    }
}

/// Bytes produced by an output format
#[derive(Debug)]
pub enum SerializedDocument {
    /// HTML
    Text(String),
    /// PDF
    Binary(Vec<u8>),
}

impl SerializedDocument {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            SerializedDocument::Text(text) => text.into_bytes(),
            SerializedDocument::Binary(bytes) => bytes,
        }
    }

    /// The rendered text; binary output is a [`FormatError::RenderError`].
    pub fn into_text(self) -> Result<String, FormatError> {
        match self {
            SerializedDocument::Text(text) => Ok(text),
            SerializedDocument::Binary(bytes) => Err(FormatError::RenderError(format!(
                "expected text output, got {} bytes of binary data",
                bytes.len()
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Read from disk into a [`Document`]
    Input,
    /// Rendered from a [`Document`]
    Output,
}

pub trait Format: Send + Sync {
    /// Name used on the command line (`--from`, `--to`)
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn role(&self) -> Role {
        Role::Output
    }

    /// Render `doc`, honoring the `--extra-*` options this format understands.
    fn render(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<SerializedDocument, FormatError> {
        let _ = (doc, options);
        Err(FormatError::NotSupported(format!(
            "Format '{}' can only be read",
            self.name()
        )))
    }
}

/// Reject options an output format does not understand.
pub(crate) fn reject_unknown_options(
    format: &str,
    options: &HashMap<String, String>,
    known: &[&str],
) -> Result<(), FormatError> {
    let mut unknown: Vec<&str> = options
        .keys()
        .map(String::as_str)
        .filter(|key| !known.contains(key))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FormatError::NotSupported(format!(
        "Format '{format}' does not accept {}",
        unknown.join(", ")
    )))
}
