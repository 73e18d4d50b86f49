//! Markdown viewing and export for mdview
//!
//!     This crate holds everything the mdview host does with a document: rendering Markdown to
//!     HTML, exporting to PDF, tracking which document is loaded and telling the display
//!     process about it.
//!
//!     This is a pure lib, that is, it powers mdview-cli but is shell agnostic. No code here
//!     prints to stdout or reads from stdin; dialogs and menus are traits the host implements.
//!
//! Architecture
//!
//!     Control flows in one direction:
//!
//!         CommandDispatcher → DocumentSession → ConversionBridge → Notifier → display process
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError
//!     ├── format.rs               # Document and the Format trait
//!     ├── registry.rs             # FormatRegistry: Markdown reader and output targets
//!     ├── publish.rs              # convert a source file, to memory or to a file
//!     ├── formats
//!     │   ├── markdown            # comrak parsing + the markdown-content fragment
//!     │   ├── html                # standalone page / fragment, html5ever normalization
//!     │   ├── pdf                 # page layout, headless Chrome print-to-PDF
//!     │   └── pandoc              # pandoc Markdown → PDF
//!     ├── bridge.rs               # Converter trait and ConversionBridge
//!     ├── session.rs              # DocumentSession
//!     ├── dispatch.rs             # open/export commands
//!     └── notify.rs               # host → display notifications
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # aggregates the subdirectories below
//!     ├── markdown
//!     ├── html
//!     ├── pdf
//!     └── session
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Library Choices
//!
//!     We never write a Markdown renderer or a PDF writer. Markdown goes through comrak, HTML
//!     normalization through html5ever, and PDF through either headless Chrome or pandoc. The
//!     PDF engines are external binaries and sit behind the `native-export` feature.
//!
pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod formats;
pub mod notify;
pub mod publish;
pub mod registry;
pub mod session;

pub use bridge::{ConversionBridge, Converter, RenderRequest};
pub use dispatch::{
    CommandDispatcher, CommandError, CommandOutcome, DialogFilter, DialogResult, ErrorKind,
    FileSelector, MenuSurface, OPEN_FILTERS, SAVE_FILTERS,
};
pub use error::FormatError;
pub use format::{Document, Format, Role, SerializedDocument};
pub use notify::{Notification, Notifier};
pub use registry::FormatRegistry;
pub use session::{DocumentSession, LoadedDocument};
