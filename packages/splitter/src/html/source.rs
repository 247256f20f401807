//! Reads the source document into an ordered segment sequence.

use scraper::{ElementRef, Html, Selector};

use super::styles::extract_embedded_styles;
use super::text::{collapse_whitespace, escape_html};
use crate::config::SplitOptions;
use crate::structure::ContentSegment;

/// Parsed source document.
///
/// The markup is parsed once; segments, title and styles are read from the
/// same tree. Nothing here is mutated after parsing.
pub struct SourceDocument {
    document: Html,
}

impl SourceDocument {
    /// Parse an HTML document. Parsing is lenient and never fails.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Text of the `<title>` element, if present and not blank.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("head title").ok()?;
        let title = self.document.select(&selector).next()?;
        let text = collapse_whitespace(&title.text().collect::<String>());
        (!text.is_empty()).then_some(text)
    }

    /// CSS of the embedded style block in the head, if usable.
    #[must_use]
    pub fn embedded_styles(&self) -> Option<String> {
        extract_embedded_styles(&self.document)
    }

    /// Body content as segments in document order.
    ///
    /// Headings up to `options.max_split_level` with non-blank text become
    /// heading segments. Wrapper `<div>`s holding headings are unwrapped so
    /// their headings are seen. Everything else is kept as content markup.
    #[must_use]
    pub fn segments(&self, options: &SplitOptions) -> Vec<ContentSegment> {
        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| self.document.select(&selector).next())
            .unwrap_or_else(|| self.document.root_element());

        let mut segments = Vec::new();
        walk_children(body, options, &mut segments);
        segments
    }
}

/// Parse `html` and return its body segments.
#[must_use]
pub fn extract_segments(html: &str, options: &SplitOptions) -> Vec<ContentSegment> {
    SourceDocument::parse(html).segments(options)
}

/// Trimmed `<title>` text of `html`.
#[must_use]
pub fn document_title(html: &str) -> Option<String> {
    SourceDocument::parse(html).title()
}

/// Level of an `h1`..`h6` tag name.
#[must_use]
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn walk_children(parent: ElementRef<'_>, options: &SplitOptions, segments: &mut Vec<ContentSegment>) {
    for child in parent.children() {
        if let Some(element) = ElementRef::wrap(child) {
            visit_element(element, options, segments);
        } else if let Some(text) = child.value().as_text() {
            let raw: &str = text;
            if !raw.trim().is_empty() {
                // Text nodes come back decoded from the parser
                segments.push(ContentSegment::content(escape_html(raw)));
            }
        }
        // Comments, doctypes and processing instructions are dropped
    }
}

fn visit_element(element: ElementRef<'_>, options: &SplitOptions, segments: &mut Vec<ContentSegment>) {
    let tag = element.value().name();

    if let Some(level) = heading_level(tag) {
        let title = collapse_whitespace(&element.text().collect::<String>());
        if level <= options.max_split_level && !title.is_empty() {
            segments.push(ContentSegment::heading(level, title, element.html()));
        } else {
            segments.push(ContentSegment::content(element.html()));
        }
        return;
    }

    if tag == "div" && contains_heading(element) {
        walk_children(element, options, segments);
        return;
    }

    segments.push(ContentSegment::content(element.html()));
}

fn contains_heading(element: ElementRef<'_>) -> bool {
    element
        .descendants()
        .filter_map(ElementRef::wrap)
        .any(|descendant| heading_level(descendant.value().name()).is_some())
}
