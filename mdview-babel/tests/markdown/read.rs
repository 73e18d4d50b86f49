//! Reading Markdown files from disk

use crate::common::write_file;
use mdview_babel::bridge::parse_markdown_to_html;
use mdview_babel::formats::markdown::{read_document, MarkdownOptions};
use mdview_babel::FormatError;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_read_sets_origin_and_title() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "readme.md", "# Hi\n\nBody.\n");

    let doc = read_document(&path, &MarkdownOptions::default()).unwrap();

    assert_eq!(doc.origin.as_deref(), Some(path.as_path()));
    assert_eq!(doc.title.as_deref(), Some("Hi"));
    assert_eq!(doc.display_title(), "Hi");
}

#[test]
fn test_display_title_falls_back_to_file_stem() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "changelog.md", "Just text.\n");

    let doc = read_document(&path, &MarkdownOptions::default()).unwrap();

    assert_eq!(doc.title, None);
    assert_eq!(doc.display_title(), "changelog");
}

#[test]
fn test_readme_scenario() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "readme.md", "# Hi");

    let html = parse_markdown_to_html(&path, &MarkdownOptions::default()).unwrap();

    assert_eq!(html, "<div class=\"markdown-content\"><h1>Hi</h1></div>");
}

#[test]
fn test_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let err = parse_markdown_to_html(dir.path(), &MarkdownOptions::default()).unwrap_err();
    assert!(matches!(err, FormatError::Io(_)));
}

#[test]
fn test_invalid_utf8_is_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("binary.md");
    fs::write(&path, b"\xc3\x28 broken").unwrap();

    let err = parse_markdown_to_html(&path, &MarkdownOptions::default()).unwrap_err();
    assert!(matches!(err, FormatError::ParseError(_)));
}
