//! CHM Splitter - Split a heading-structured HTML document into help pages.
//!
//! This crate reads one large HTML document (typically a Word "Save as web
//! page" export), organizes it into a tree of sections by heading level and
//! writes one page per section, ready for compilation into a CHM help file.
//!
//! # Example
//!
//! ```
//! use chm_splitter::{ChmDocument, SplitOptions};
//!
//! let html = "<body><h1>Intro</h1><p>Hello</p><h2>Details</h2><p>More</p></body>";
//! let document = ChmDocument::parse(html, &SplitOptions::new());
//!
//! assert_eq!(document.index().len(), 2);
//! assert!(document.search_by_title("details").is_some());
//! ```
//!
//! # Architecture
//!
//! The splitter is organized into several modules:
//!
//! - [`config`]: Reserved names, defaults and validation
//! - [`error`]: Error types and Result alias
//! - [`html`]: Source parsing, style extraction and text helpers
//! - [`structure`]: Section tree, tree builder and index queries
//! - [`output`]: Page writing, file naming, links, TOC and search index
//! - [`document`]: The document facade tying it together
//! - [`package`]: File to help package directory in one call
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod html;
pub mod output;
pub mod package;
pub mod structure;

// Re-export main types
pub use document::ChmDocument;
pub use package::{read_source, split_file, SplitReport};

// Re-export commonly used items
pub use config::{SplitOptions, DEFAULT_TITLE, EMBEDDED_CSS_FILE_NAME, INITIAL_SECTION_FILE_NAME};
pub use error::{Result, SplitterError};
pub use output::{PageDecorator, SearchIndexer, StandardPageDecorator, TextIndexer};
pub use structure::{ContentSegment, SectionNode, TreeBuilder};
