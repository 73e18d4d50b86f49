//! Print-to-PDF through a headless Chrome/Chromium binary.

use super::PrintLayout;
use crate::error::FormatError;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;
use url::Url;
use which::which;

/// Print a standalone HTML page to PDF bytes.
pub fn render_page_to_pdf(html: &str, layout: &PrintLayout) -> Result<Vec<u8>, FormatError> {
    let final_html = inject_page_css(html, &layout.print_css());
    let chrome = resolve_chrome_binary()?;
    let temp_dir =
        tempdir().map_err(|e| FormatError::RenderError(format!("Temp dir error: {e}")))?;
    let html_path = temp_dir.path().join("mdview-export.html");
    fs::write(&html_path, final_html.as_bytes())
        .map_err(|e| FormatError::RenderError(e.to_string()))?;

    let pdf_path = temp_dir.path().join("mdview-export.pdf");
    let file_url = Url::from_file_path(&html_path).map_err(|_| {
        FormatError::RenderError("Failed to construct file:// URL for HTML input".to_string())
    })?;

    let pdf_arg = format!("--print-to-pdf={}", pdf_path.display());
    let window_arg = {
        let (w, h) = layout.viewport();
        format!("--window-size={w},{h}")
    };

    tracing::debug!(chrome = %chrome.display(), page_size = %layout.page_size, "printing page to PDF");

    let status = Command::new(&chrome)
        .arg("--headless")
        .arg("--disable-gpu")
        .arg("--no-sandbox")
        .arg("--disable-dev-shm-usage")
        .arg("--print-to-pdf-no-header")
        .arg(pdf_arg)
        .arg(window_arg)
        .arg(file_url.as_str())
        .status()
        .map_err(|e| {
            FormatError::RenderError(format!(
                "Failed to launch Chrome ({}): {}",
                chrome.display(),
                e
            ))
        })?;

    if !status.success() {
        return Err(FormatError::RenderError(format!(
            "Chrome exited with status {status}"
        )));
    }

    fs::read(&pdf_path).map_err(|e| FormatError::RenderError(e.to_string()))
}

fn inject_page_css(html: &str, css: &str) -> String {
    let style_tag = format!("<style data-mdview-pdf>\n{css}\n</style>");
    if let Some(idx) = html.find("</head>") {
        let mut output = String::with_capacity(html.len() + style_tag.len());
        output.push_str(&html[..idx]);
        output.push_str(&style_tag);
        output.push_str(&html[idx..]);
        output
    } else {
        format!("{style_tag}{html}")
    }
}

fn resolve_chrome_binary() -> Result<PathBuf, FormatError> {
    for var in ["MDVIEW_CHROME_BIN", "GOOGLE_CHROME_BIN", "CHROME_BIN"] {
        if let Some(path) = env::var_os(var) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
    }

    for candidate in [
        "google-chrome",
        "google-chrome-stable",
        "chromium",
        "chromium-browser",
        "chrome",
        "msedge",
    ] {
        if let Ok(path) = which(candidate) {
            return Ok(path);
        }
    }

    #[cfg(target_os = "macos")]
    {
        let candidate = PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    #[cfg(target_os = "windows")]
    {
        let candidates = [
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];
        for candidate in candidates {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }
    }

    Err(FormatError::RenderError(
        "Unable to locate a Chrome/Chromium binary. Set MDVIEW_CHROME_BIN to override the detection."
            .to_string(),
    ))
}
