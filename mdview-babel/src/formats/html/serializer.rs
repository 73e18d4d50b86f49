//! HTML serialization (Markdown → standalone HTML page)
//!
//! Pipeline: Markdown → Comrak HTML fragment → RcDom (normalization) → HTML page with CSS

use crate::error::FormatError;
use crate::format::Document;
use crate::formats::html::HtmlTheme;
use crate::formats::markdown::{render_fragment, MarkdownOptions};
use html5ever::serialize::{SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

/// Options for HTML serialization
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// CSS theme to use
    pub theme: HtmlTheme,
    /// Optional custom CSS to append after the baseline and theme CSS
    pub custom_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(theme: HtmlTheme) -> Self {
        Self {
            theme,
            custom_css: None,
        }
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }
}

/// The baseline stylesheet embedded in every standalone page
pub fn get_default_css() -> &'static str {
    BASELINE_CSS
}

/// Serialize a document to a standalone HTML page with full options
pub fn serialize_to_html_with_options(
    doc: &Document,
    markdown: &MarkdownOptions,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let fragment = render_fragment(doc, markdown);
    wrap_in_document(&fragment, &doc.display_title(), options)
}

/// Re-serialize an HTML fragment through a browser-grade parser.
///
/// Unclosed or stray tags are balanced the way a browser would balance them. The result is a
/// fixed point: normalizing it again yields the same markup.
pub fn normalize_fragment(fragment: &str) -> Result<String, FormatError> {
    let dom = parse_document(RcDom::default(), Default::default()).one(fragment);

    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    let mut output = Vec::new();
    // Leading <style>/<link>/<meta> in raw HTML end up in <head>, everything else in <body>.
    for section in ["head", "body"] {
        let Some(element) = find_element(&dom.document, section) else {
            continue;
        };
        for child in element.children.borrow().iter() {
            let serializable = SerializableHandle::from(child.clone());
            serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
                FormatError::RenderError(format!("HTML serialization failed: {e}"))
            })?;
        }
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::RenderError(format!("UTF-8 conversion failed: {e}")))
}

fn find_element(handle: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if &*name.local == tag {
            return Some(handle.clone());
        }
    }
    handle
        .children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

/// Wrap a rendered fragment in a complete HTML document with embedded CSS
pub(crate) fn wrap_in_document(
    fragment: &str,
    title: &str,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let theme_css = match options.theme {
        HtmlTheme::Serif => include_str!("../../../css/themes/theme-serif.css"),
        HtmlTheme::Modern => include_str!("../../../css/themes/theme-modern.css"),
    };

    // Custom CSS is appended after baseline and theme
    let custom_css = options.custom_css.as_deref().unwrap_or("");

    let escaped_title = html_escape(title);
    let body_html = normalize_fragment(fragment)?;

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="mdview">
  <title>{escaped_title}</title>
  <style>
{BASELINE_CSS}
{theme_css}
{custom_css}
  </style>
</head>
<body>
{body_html}
</body>
</html>"#
    );

    Ok(html)
}

/// Escape HTML special characters in text
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
