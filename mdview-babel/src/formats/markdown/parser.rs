//! Markdown reading and rendering
//!
//! Pipeline: file bytes → UTF-8 source → Comrak AST (title) / Comrak HTML (fragment)

use super::{MarkdownOptions, CONTAINER_CLASS};
use crate::error::FormatError;
use crate::format::Document;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{markdown_to_html, parse_document, Arena};
use std::fs;
use std::path::Path;

/// Parse Markdown source into a [`Document`]
pub fn parse_from_markdown(source: &str, options: &MarkdownOptions) -> Document {
    Document {
        source: source.to_string(),
        title: extract_title(source, options),
        origin: None,
    }
}

/// Read a Markdown file from disk.
///
/// Fails with [`FormatError::Io`] when the file cannot be read and with
/// [`FormatError::ParseError`] when its bytes are not valid UTF-8.
pub fn read_document(path: &Path, options: &MarkdownOptions) -> Result<Document, FormatError> {
    let bytes = fs::read(path).map_err(|e| FormatError::io(path, e))?;
    let source = String::from_utf8(bytes).map_err(|e| {
        FormatError::ParseError(format!("{} is not valid UTF-8: {e}", path.display()))
    })?;
    let mut doc = parse_from_markdown(&source, options);
    doc.origin = Some(path.to_path_buf());
    Ok(doc)
}

/// Render a document to HTML wrapped in the `markdown-content` container
pub fn render_fragment(doc: &Document, options: &MarkdownOptions) -> String {
    let html = markdown_to_html(&doc.source, &options.comrak_options());
    format!(
        "<div class=\"{CONTAINER_CLASS}\">{}</div>",
        html.trim_end_matches('\n')
    )
}

/// First level-1 heading of the document, if any
fn extract_title(source: &str, options: &MarkdownOptions) -> Option<String> {
    let arena = Arena::new();
    let root = parse_document(&arena, source, &options.comrak_options());

    for child in root.children() {
        let is_h1 = matches!(
            &child.data.borrow().value,
            NodeValue::Heading(heading) if heading.level == 1
        );
        if is_h1 {
            let mut title = String::new();
            collect_text_content(child, &mut title);
            let title = title.trim().to_string();
            return (!title.is_empty()).then_some(title);
        }
    }
    None
}

/// Collect text content from a node
fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
