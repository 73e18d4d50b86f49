//! Command dispatcher for the "open" and "export" user commands
//!
//! State machine over [`DocumentSession`]:
//!
//! ```text
//! Empty  --open ok-->  Loaded
//! Loaded --open ok-->  Loaded (replaced)
//! export and failed opens never change state
//! ```
//!
//! Export is gated on a loaded document: without one it fails before any dialog is shown or
//! any collaborator is touched. Cancelling a dialog is an outcome, not an error.

use crate::bridge::{Converter, RenderRequest};
use crate::error::FormatError;
use crate::notify::{Notification, Notifier};
use crate::session::DocumentSession;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A named group of file extensions offered by a file dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

/// Filters offered when choosing a Markdown file to open
pub const OPEN_FILTERS: &[DialogFilter] = &[
    DialogFilter {
        name: "Markdown (*.md)",
        extensions: &["md"],
    },
    DialogFilter {
        name: "All files (*.*)",
        extensions: &["*"],
    },
];

/// Filters offered when choosing where to save a PDF
pub const SAVE_FILTERS: &[DialogFilter] = &[DialogFilter {
    name: "PDF (*.pdf)",
    extensions: &["pdf"],
}];

/// What a file dialog returned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogResult {
    pub canceled: bool,
    pub path: Option<PathBuf>,
}

impl DialogResult {
    pub fn selected(path: impl Into<PathBuf>) -> Self {
        Self {
            canceled: false,
            path: Some(path.into()),
        }
    }

    pub fn canceled() -> Self {
        Self {
            canceled: true,
            path: None,
        }
    }
}

/// Native open/save dialogs
pub trait FileSelector {
    fn pick_source(&mut self, filters: &[DialogFilter]) -> io::Result<DialogResult>;

    fn pick_destination(&mut self, filters: &[DialogFilter]) -> io::Result<DialogResult>;
}

/// Application menu capabilities
pub trait MenuSurface {
    fn set_export_enabled(&mut self, enabled: bool);
}

/// Successful result of a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The user dismissed the dialog; nothing changed.
    Cancelled,
    Opened { path: PathBuf },
    Exported { path: PathBuf },
}

/// Error category reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Parse,
    Render,
    Precondition,
}

/// Why a command failed
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no document is loaded")]
    NoDocument,
    #[error("no destination selected")]
    NoDestination,
    #[error("file dialog failed: {0}")]
    Dialog(#[source] io::Error),
    #[error(transparent)]
    Conversion(#[from] FormatError),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::NoDocument | CommandError::NoDestination => ErrorKind::Precondition,
            CommandError::Dialog(_) => ErrorKind::Io,
            CommandError::Conversion(err) => match err {
                FormatError::Io(_) => ErrorKind::Io,
                FormatError::ParseError(_) => ErrorKind::Parse,
                FormatError::RenderError(_)
                | FormatError::NotSupported(_)
                | FormatError::FormatNotFound(_) => ErrorKind::Render,
            },
        }
    }
}

/// Routes user commands to the session, the converter and the notification channel
pub struct CommandDispatcher<S, M, C> {
    selector: S,
    menu: M,
    converter: C,
    notifier: Notifier,
}

impl<S, M, C> CommandDispatcher<S, M, C>
where
    S: FileSelector,
    M: MenuSurface,
    C: Converter,
{
    /// Create a dispatcher. Export starts disabled on the menu.
    pub fn new(selector: S, mut menu: M, converter: C, notifier: Notifier) -> Self {
        menu.set_export_enabled(false);
        Self {
            selector,
            menu,
            converter,
            notifier,
        }
    }

    pub fn selector_mut(&mut self) -> &mut S {
        &mut self.selector
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Ask for a Markdown file, render it and make it the loaded document.
    pub fn handle_open(
        &mut self,
        session: &mut DocumentSession,
    ) -> Result<CommandOutcome, CommandError> {
        let choice = self
            .selector
            .pick_source(OPEN_FILTERS)
            .map_err(CommandError::Dialog)?;
        let path = match choice {
            DialogResult {
                canceled: false,
                path: Some(path),
            } => path,
            _ => return Ok(CommandOutcome::Cancelled),
        };

        let html = self.converter.to_html(&path)?;
        session.load(path.clone(), html.clone());
        self.menu.set_export_enabled(true);
        tracing::info!(path = %path.display(), "document opened");

        self.notifier.push(Notification::DocumentLoaded {
            path: path.clone(),
            html_content: html,
        });
        Ok(CommandOutcome::Opened { path })
    }

    /// Ask for a destination and export the loaded document to PDF.
    pub fn handle_export(
        &mut self,
        session: &DocumentSession,
    ) -> Result<CommandOutcome, CommandError> {
        let source_path = session.source_path().ok_or(CommandError::NoDocument)?;

        let choice = self
            .selector
            .pick_destination(SAVE_FILTERS)
            .map_err(CommandError::Dialog)?;
        if choice.canceled {
            return Ok(CommandOutcome::Cancelled);
        }
        let destination = choice.path.ok_or(CommandError::NoDestination)?;

        let html = self.converter.to_html(source_path)?;
        self.converter.to_pdf(&RenderRequest {
            source_path,
            html: &html,
            destination: &destination,
        })?;
        tracing::info!(
            source = %source_path.display(),
            destination = %destination.display(),
            "document exported"
        );

        self.notifier.push(Notification::ExportCompleted {
            path: destination.clone(),
        });
        Ok(CommandOutcome::Exported { path: destination })
    }
}
