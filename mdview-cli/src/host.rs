//! Interactive session host behind `mdview session`.
//!
//! Commands are read one per line:
//!
//! ```text
//! open [path]      open a Markdown file (prompts when no path is given)
//! export [path]    export the open document to PDF (prompts when no path is given)
//! menu             show whether export is available
//! quit             end the session
//! ```
//!
//! A file named on the command line (`mdview session notes.md`) is opened before the first
//! command is read.
//!
//! Prompts and status lines go to the status writer (stderr). Notifications for the display
//! process are written as JSON lines by a dedicated display thread (stdout).

use mdview_babel::dispatch::{
    CommandDispatcher, CommandError, CommandOutcome, DialogFilter, DialogResult, ErrorKind,
    FileSelector, MenuSurface,
};
use mdview_babel::notify::{self, Notification};
use mdview_babel::{Converter, DocumentSession};
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};

/// A line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Open(Option<PathBuf>),
    Export(Option<PathBuf>),
    Menu,
    Quit,
    Blank,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
            None => (line, None),
        };
        match (name, arg) {
            ("", _) => Ok(SessionCommand::Blank),
            ("open", path) => Ok(SessionCommand::Open(path.map(PathBuf::from))),
            ("export", path) => Ok(SessionCommand::Export(path.map(PathBuf::from))),
            ("menu", None) => Ok(SessionCommand::Menu),
            ("quit" | "exit", None) => Ok(SessionCommand::Quit),
            _ => Err(format!("unknown command '{line}'")),
        }
    }
}

/// File dialogs answered from the command line.
///
/// A path given inline with the command answers the next dialog; otherwise the user is
/// prompted and an empty line cancels.
pub struct LineSelector<R, W> {
    input: R,
    prompt: W,
    answer: Option<PathBuf>,
}

impl<R: BufRead, W: Write> LineSelector<R, W> {
    pub fn new(input: R, prompt: W) -> Self {
        Self {
            input,
            prompt,
            answer: None,
        }
    }

    /// Next line of input, without its line ending. `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn answer_with(&mut self, path: PathBuf) {
        self.answer = Some(path);
    }

    pub fn clear_answer(&mut self) {
        self.answer = None;
    }

    pub fn status(&mut self) -> &mut W {
        &mut self.prompt
    }

    fn ask(&mut self, title: &str, filters: &[DialogFilter]) -> io::Result<DialogResult> {
        if let Some(path) = self.answer.take() {
            return absolute(path).map(DialogResult::selected);
        }

        let offered: Vec<&str> = filters.iter().map(|f| f.name).collect();
        write!(
            self.prompt,
            "{title} [{}] (empty line cancels): ",
            offered.join(", ")
        )?;
        self.prompt.flush()?;

        match self.read_line()? {
            Some(line) if !line.trim().is_empty() => {
                absolute(PathBuf::from(line.trim())).map(DialogResult::selected)
            }
            _ => Ok(DialogResult::canceled()),
        }
    }
}

impl<R: BufRead, W: Write> FileSelector for LineSelector<R, W> {
    fn pick_source(&mut self, filters: &[DialogFilter]) -> io::Result<DialogResult> {
        self.ask("Markdown file to open", filters)
    }

    fn pick_destination(&mut self, filters: &[DialogFilter]) -> io::Result<DialogResult> {
        self.ask("Save PDF as", filters)
    }
}

fn absolute(path: PathBuf) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

/// The export menu item of the command-line host
#[derive(Debug, Default)]
pub struct CliMenu {
    export_enabled: bool,
}

impl CliMenu {
    pub fn export_enabled(&self) -> bool {
        self.export_enabled
    }
}

impl MenuSurface for CliMenu {
    fn set_export_enabled(&mut self, enabled: bool) {
        tracing::debug!(enabled, "export menu item");
        self.export_enabled = enabled;
    }
}

/// Drain notifications into `display` as JSON lines until every notifier is dropped.
///
/// The writer is handed back when the channel closes. A write failure ends the thread; later
/// notifications are then dropped by the notifier.
pub fn spawn_display<W>(receiver: Receiver<Notification>, mut display: W) -> JoinHandle<io::Result<W>>
where
    W: Write + Send + 'static,
{
    thread::spawn(move || {
        for notification in receiver {
            serde_json::to_writer(&mut display, &notification)?;
            display.write_all(b"\n")?;
            display.flush()?;
        }
        Ok(display)
    })
}

fn kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Io => "io",
        ErrorKind::Parse => "parse",
        ErrorKind::Render => "render",
        ErrorKind::Precondition => "precondition",
    }
}

fn report<W: Write>(
    status: &mut W,
    result: Result<CommandOutcome, CommandError>,
) -> io::Result<()> {
    match result {
        Ok(CommandOutcome::Cancelled) => writeln!(status, "cancelled"),
        Ok(CommandOutcome::Opened { path }) => writeln!(status, "opened {}", path.display()),
        Ok(CommandOutcome::Exported { path }) => writeln!(status, "exported {}", path.display()),
        Err(err) => {
            let kind = kind_label(err.kind());
            match err.kind() {
                ErrorKind::Precondition => tracing::warn!(kind, "{err}"),
                _ => tracing::error!(kind, "{err}"),
            }
            writeln!(status, "error ({kind}): {err}")
        }
    }
}

/// Run the interactive host until `quit` or end of input.
///
/// `initial` is opened first, as if `open <initial>` were the first line of input. Command
/// failures are reported on `status` and the loop continues; only I/O errors on the host's own
/// streams end the session early.
pub fn run_session<R, W, D, C>(
    input: R,
    status: W,
    display: D,
    converter: C,
    initial: Option<PathBuf>,
) -> io::Result<D>
where
    R: BufRead,
    W: Write,
    D: Write + Send + 'static,
    C: Converter,
{
    let (notifier, receiver) = notify::channel();
    let display_thread = spawn_display(receiver, display);

    let mut dispatcher = CommandDispatcher::new(
        LineSelector::new(input, status),
        CliMenu::default(),
        converter,
        notifier,
    );
    let mut session = DocumentSession::new();

    if let Some(path) = initial {
        tracing::debug!(path = %path.display(), "opening startup file");
        dispatcher.selector_mut().answer_with(path);
        let result = dispatcher.handle_open(&mut session);
        let selector = dispatcher.selector_mut();
        selector.clear_answer();
        report(selector.status(), result)?;
    }

    while let Some(line) = dispatcher.selector_mut().read_line()? {
        let command = match SessionCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(dispatcher.selector_mut().status(), "error: {message}")?;
                continue;
            }
        };

        let result = match command {
            SessionCommand::Blank => continue,
            SessionCommand::Quit => break,
            SessionCommand::Menu => {
                let state = if dispatcher.menu().export_enabled() {
                    "enabled"
                } else {
                    "disabled"
                };
                writeln!(dispatcher.selector_mut().status(), "export: {state}")?;
                continue;
            }
            SessionCommand::Open(path) => {
                if let Some(path) = path {
                    dispatcher.selector_mut().answer_with(path);
                }
                dispatcher.handle_open(&mut session)
            }
            SessionCommand::Export(path) => {
                if let Some(path) = path {
                    dispatcher.selector_mut().answer_with(path);
                }
                dispatcher.handle_export(&session)
            }
        };

        let selector = dispatcher.selector_mut();
        selector.clear_answer();
        report(selector.status(), result)?;
    }

    drop(dispatcher);
    display_thread
        .join()
        .map_err(|_| io::Error::other("display thread panicked"))?
}
