//! Markdown → PDF through `pandoc`
//!
//! Pandoc reads the Markdown source file itself and writes the PDF straight to the requested
//! output path. The HTML-based `wkhtmltopdf` PDF engine is used so the optional stylesheet is
//! honoured the same way it is for the Chrome engine.
//!
//! The binary is taken from `MDVIEW_PANDOC_BIN`, falling back to `pandoc` on the `PATH`.

use crate::error::FormatError;
use crate::format::Document;
use crate::formats::pdf::PdfSettings;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;
use which::which;

const PDF_ENGINE: &str = "wkhtmltopdf";

/// Convert a Markdown file on disk into a PDF written at `output`.
pub fn render_file_to_pdf(
    source: &Path,
    output: &Path,
    settings: &PdfSettings,
) -> Result<(), FormatError> {
    let pandoc = resolve_pandoc_binary()?;
    let args = pandoc_args(source, output, settings);

    tracing::debug!(pandoc = %pandoc.display(), source = %source.display(), "running pandoc");

    let result = Command::new(&pandoc).args(&args).output().map_err(|e| {
        FormatError::RenderError(format!(
            "Failed to launch pandoc ({}): {}",
            pandoc.display(),
            e
        ))
    })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(FormatError::RenderError(format!(
            "pandoc exited with status {}: {}",
            result.status,
            stderr.trim()
        )));
    }
    Ok(())
}

/// Convert an in-memory document into PDF bytes.
pub fn render_markdown_to_pdf(
    doc: &Document,
    settings: &PdfSettings,
) -> Result<Vec<u8>, FormatError> {
    let temp_dir =
        tempdir().map_err(|e| FormatError::RenderError(format!("Temp dir error: {e}")))?;
    let source = temp_dir.path().join("mdview-export.md");
    fs::write(&source, doc.source.as_bytes())
        .map_err(|e| FormatError::RenderError(e.to_string()))?;
    let output = temp_dir.path().join("mdview-export.pdf");

    render_file_to_pdf(&source, &output, settings)?;
    fs::read(&output).map_err(|e| FormatError::RenderError(e.to_string()))
}

fn pandoc_args(source: &Path, output: &Path, settings: &PdfSettings) -> Vec<String> {
    let layout = &settings.layout;
    let mut args = vec![
        source.display().to_string(),
        "--from=gfm".to_string(),
        format!("--output={}", output.display()),
        format!("--pdf-engine={PDF_ENGINE}"),
        format!("--variable=papersize:{}", layout.page_size),
    ];
    if layout.landscape {
        args.push("--pdf-engine-opt=--orientation".to_string());
        args.push("--pdf-engine-opt=Landscape".to_string());
    }
    if !layout.print_background {
        args.push("--pdf-engine-opt=--no-background".to_string());
    }
    if let Some(stylesheet) = &settings.stylesheet {
        args.push(format!("--css={}", stylesheet.display()));
    }
    args
}

fn resolve_pandoc_binary() -> Result<PathBuf, FormatError> {
    if let Some(path) = env::var_os("MDVIEW_PANDOC_BIN") {
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    which("pandoc").map_err(|_| {
        FormatError::RenderError(
            "Unable to locate pandoc. Set MDVIEW_PANDOC_BIN to override the detection."
                .to_string(),
        )
    })
}
