//! One-shot conversion of a Markdown file, as run by `mdview convert`.
//!
//! The source file is read through the registry's Markdown reader and rendered by the requested
//! target. Text output comes back to the caller unless an output path is given; binary output
//! (PDF) always needs one.

use crate::error::FormatError;
use crate::format::SerializedDocument;
use crate::registry::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// What to convert and where the result goes.
///
/// ```ignore
/// let spec = PublishSpec::new(Path::new("notes.md"), "pdf")
///     .write_to(Path::new("notes.pdf"))
///     .option("page-size", "letter");
/// ```
#[derive(Debug)]
pub struct PublishSpec<'a> {
    source: &'a Path,
    from: Option<&'a str>,
    target: &'a str,
    output: Option<&'a Path>,
    options: HashMap<String, String>,
}

impl<'a> PublishSpec<'a> {
    pub fn new(source: &'a Path, target: &'a str) -> Self {
        Self {
            source,
            from: None,
            target,
            output: None,
            options: HashMap::new(),
        }
    }

    /// Name the input format instead of detecting it from the file extension.
    pub fn from_format(mut self, name: &'a str) -> Self {
        self.from = Some(name);
        self
    }

    pub fn write_to(mut self, path: &'a Path) -> Self {
        self.output = Some(path);
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Later options win over earlier ones with the same key.
    pub fn options<I>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.options.extend(options);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Published {
    /// Rendered text, nothing written.
    Text(String),
    Written { path: PathBuf, bytes: usize },
}

/// Convert the file named by `spec`.
///
/// The target is resolved before the source is touched, so an unknown target never reads the
/// file. Read failures are [`FormatError::Io`] or [`FormatError::ParseError`]; renderer failures
/// come back unchanged from the target format.
pub fn publish(registry: &FormatRegistry, spec: PublishSpec<'_>) -> Result<Published, FormatError> {
    let target = registry.target(spec.target)?;

    let from = match spec.from {
        Some(name) => name,
        None => registry.detect_input(spec.source).ok_or_else(|| {
            FormatError::NotSupported(format!(
                "Could not detect format from filename '{}'",
                spec.source.display()
            ))
        })?,
    };
    let document = registry.read(spec.source, from)?;
    let rendered = target.render(&document, &spec.options)?;

    match (rendered, spec.output) {
        (SerializedDocument::Text(text), None) => Ok(Published::Text(text)),
        (SerializedDocument::Binary(_), None) => Err(FormatError::NotSupported(format!(
            "'{}' output is binary and needs an output path",
            spec.target
        ))),
        (rendered, Some(path)) => {
            let bytes = rendered.into_bytes();
            fs::write(path, &bytes).map_err(|e| FormatError::io(path, e))?;
            tracing::debug!(
                source = %spec.source.display(),
                output = %path.display(),
                bytes = bytes.len(),
                "published"
            );
            Ok(Published::Written {
                path: path.to_path_buf(),
                bytes: bytes.len(),
            })
        }
    }
}
