//! Error types for conversion operations

use thiserror::Error;

/// Errors that can occur while converting or exporting a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// A file could not be read or written
    #[error("I/O error: {0}")]
    Io(String),
    /// Source text could not be decoded or parsed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The HTML or PDF renderer failed
    #[error("Render error: {0}")]
    RenderError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

impl FormatError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        FormatError::Io(format!("{}: {err}", path.display()))
    }
}
