//! The currently loaded document
//!
//! A session is either empty or holds a source path together with the HTML rendered from it.
//! The pair is stored as one value, so the path and HTML are always replaced together.

use std::path::{Path, PathBuf};

/// A Markdown file and the HTML rendered from it when it was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub html: String,
}

/// Document state owned by the host loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSession {
    current: Option<LoadedDocument>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&LoadedDocument> {
        self.current.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.current.as_ref().map(|doc| doc.path.as_path())
    }

    pub fn rendered_html(&self) -> Option<&str> {
        self.current.as_ref().map(|doc| doc.html.as_str())
    }

    /// Replace the loaded document, returning the previous one.
    pub fn load(&mut self, path: PathBuf, html: String) -> Option<LoadedDocument> {
        self.current.replace(LoadedDocument { path, html })
    }
}
