//! Types for the document structuring pass.

/// One block of the flat source document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSegment {
    /// A heading that opens a section.
    Heading {
        /// Heading level (1 for `<h1>`).
        level: u8,
        /// Heading text with whitespace collapsed.
        title: String,
        /// Outer markup of the heading element.
        html: String,
    },

    /// Any other block: paragraphs, tables, images, text runs.
    Content(String),
}

impl ContentSegment {
    /// Create a heading segment.
    #[must_use]
    pub fn heading(level: u8, title: impl Into<String>, html: impl Into<String>) -> Self {
        Self::Heading {
            level,
            title: title.into(),
            html: html.into(),
        }
    }

    /// Create a content segment.
    #[must_use]
    pub fn content(html: impl Into<String>) -> Self {
        Self::Content(html.into())
    }

    /// Heading level, or `None` for plain content.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::Heading { level, .. } => Some(*level),
            Self::Content(_) => None,
        }
    }

    /// Markup of the segment.
    #[must_use]
    pub fn html(&self) -> &str {
        match self {
            Self::Heading { html, .. } | Self::Content(html) => html,
        }
    }
}
