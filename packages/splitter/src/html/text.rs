//! Text helpers shared by the HTML readers and writers.

use scraper::{ElementRef, Html, Selector};

/// Collapse runs of whitespace (including non-breaking spaces) to single
/// spaces and trim the ends.
///
/// # Examples
/// ```
/// use chm_splitter::html::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  1.\u{a0}\u{a0}Getting\n started "), "1. Getting started");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Escape text for use in HTML element content or a double-quoted attribute.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Visible text of an HTML page or fragment, whitespace collapsed.
///
/// Only the `<body>` is read when there is one; script and style contents
/// are skipped.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut parts: Vec<&str> = Vec::new();
    collect_text(body, &mut parts);
    collapse_whitespace(&parts.join(" "))
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    if matches!(element.value().name(), "script" | "style" | "noscript") {
        return;
    }
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            parts.push(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            collect_text(child_element, parts);
        }
    }
}

/// Inner HTML of the `<body>` of a page, or the input when it has no body
/// markup of its own.
#[must_use]
pub fn body_inner_html(html: &str) -> String {
    if !html.to_ascii_lowercase().contains("<body") {
        return html.to_string();
    }
    let document = Html::parse_document(html);
    Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map_or_else(|| html.to_string(), |body| body.inner_html())
}
