//! Format implementations
//!
//! Markdown is the input format; HTML (standalone page or bare fragment) and PDF are outputs.

pub mod html;
pub mod markdown;
#[cfg(feature = "native-export")]
pub mod pandoc;
pub mod pdf;

pub use html::{get_default_css, HtmlFormat, HtmlFragmentFormat, HtmlOptions, HtmlTheme};
pub use markdown::{MarkdownFormat, MarkdownOptions};
#[cfg(feature = "native-export")]
pub use pdf::PdfFormat;
pub use pdf::{PageSize, PdfEngineKind, PdfSettings, PrintLayout};
