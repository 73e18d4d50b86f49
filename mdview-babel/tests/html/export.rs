//! Export tests for the HTML formats (Markdown → HTML)

use crate::common::write_file;
use mdview_babel::format::{Format, SerializedDocument};
use mdview_babel::formats::html::{HtmlFormat, HtmlFragmentFormat, HtmlTheme};
use mdview_babel::formats::markdown::{parse_from_markdown, MarkdownOptions};
use mdview_babel::{Document, FormatError};
use std::collections::HashMap;
use tempfile::tempdir;

fn doc(src: &str) -> Document {
    parse_from_markdown(src, &MarkdownOptions::default())
}

fn render_text(format: &dyn Format, src: &str, options: &HashMap<String, String>) -> String {
    format
        .render(&doc(src), options)
        .and_then(SerializedDocument::into_text)
        .unwrap()
}

fn page(src: &str, theme: HtmlTheme) -> String {
    render_text(&HtmlFormat::new(theme), src, &HashMap::new())
}

#[test]
fn test_standalone_page_structure() {
    let html = page("# Guide\n\nBody text.\n", HtmlTheme::Modern);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta name=\"generator\" content=\"mdview\">"));
    assert!(html.contains("<title>Guide</title>"));
    assert!(html.contains("<div class=\"markdown-content\"><h1>Guide</h1>"));
    assert!(html.contains("<p>Body text.</p>"));
    assert!(html.trim_end().ends_with("</html>"));
}

#[test]
fn test_baseline_css_always_embedded() {
    let html = page("text", HtmlTheme::Modern);
    assert!(html.contains(".markdown-content"));
    assert!(html.contains("Helvetica"));
}

#[test]
fn test_serif_theme_css() {
    let html = page("text", HtmlTheme::Serif);
    assert!(html.contains("Source Serif 4"));
}

#[test]
fn test_theme_option_overrides_format_theme() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "serif".to_string());

    let html = render_text(&HtmlFormat::new(HtmlTheme::Modern), "text", &options);
    assert!(html.contains("Source Serif 4"));
}

#[test]
fn test_custom_css_appended() {
    let dir = tempdir().unwrap();
    let css = write_file(dir.path(), "custom.css", "h1 { color: rebeccapurple; }");
    let mut options = HashMap::new();
    options.insert("css-path".to_string(), css.display().to_string());

    let html = render_text(&HtmlFormat::default(), "# Styled", &options);
    assert!(html.contains("h1 { color: rebeccapurple; }"));
}

#[test]
fn test_missing_custom_css_is_io_error() {
    let mut options = HashMap::new();
    options.insert(
        "css-path".to_string(),
        "/definitely/not/here.css".to_string(),
    );

    let err = HtmlFormat::default()
        .render(&doc("text"), &options)
        .unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
}

#[test]
fn test_unbalanced_raw_html_is_closed_in_page() {
    let html = page("<div>\n\nopen", HtmlTheme::Modern);
    let body = html.split("<body>").nth(1).unwrap();
    assert_eq!(body.matches("<div").count(), body.matches("</div>").count());
}

#[test]
fn test_fragment_format_emits_container_only() {
    let html = render_text(&HtmlFragmentFormat::default(), "# Hi", &HashMap::new());
    assert_eq!(html, "<div class=\"markdown-content\"><h1>Hi</h1></div>");
}

#[test]
fn test_fragment_format_takes_no_options() {
    let mut options = HashMap::new();
    options.insert("theme".to_string(), "serif".to_string());

    let err = HtmlFragmentFormat::default()
        .render(&doc("# Hi"), &options)
        .unwrap_err();
    assert_eq!(
        err,
        FormatError::NotSupported("Format 'html-fragment' does not accept theme".to_string())
    );
}
