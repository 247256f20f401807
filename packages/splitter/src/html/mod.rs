//! HTML reading utilities.
//!
//! The source document is parsed once with `scraper` into an immutable tree
//! and read from there; nothing depends on a live, mutable DOM.

mod source;
mod styles;
mod text;

pub use source::{document_title, extract_segments, heading_level, SourceDocument};
pub use styles::{clean_style_block, extract_embedded_styles};
pub use text::{body_inner_html, collapse_whitespace, escape_html, plain_text};
