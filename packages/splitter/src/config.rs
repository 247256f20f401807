//! Configuration constants and validation functions for the splitter.

use std::path::Path;

use crate::error::{Result, SplitterError};

/// File name for the content that precedes the first heading.
pub const INITIAL_SECTION_FILE_NAME: &str = "start.htm";

/// File name for the CSS extracted from the document header.
pub const EMBEDDED_CSS_FILE_NAME: &str = "embeddedstyles.css";

/// Title used when the source document has none.
pub const DEFAULT_TITLE: &str = "Help content";

/// Extension given to every split page.
pub const PAGE_EXTENSION: &str = "htm";

/// Slug used for sections whose title yields no usable characters.
pub const FALLBACK_SLUG: &str = "section";

/// Maximum slug length before the extension and any disambiguating suffix.
///
/// Help compilers choke on very long topic paths, so titles are cut here.
pub const MAX_SLUG_LEN: usize = 48;

/// Deepest heading level HTML defines.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Output directory used by the CLI when none is given.
pub const DEFAULT_OUTPUT_DIR: &str = "help";

/// File name of the table of contents manifest.
pub const TOC_FILE_NAME: &str = "toc.yaml";

/// File name of the search index written by the CLI.
pub const SEARCH_INDEX_FILE_NAME: &str = "search-index.yaml";

/// Check whether a file name is reserved for non-section output.
///
/// The comparison ignores case, as help packages are usually built on
/// case-insensitive filesystems.
///
/// # Examples
/// ```
/// use chm_splitter::config::is_reserved_file_name;
///
/// assert!(is_reserved_file_name("START.HTM"));
/// assert!(is_reserved_file_name("embeddedstyles.css"));
/// assert!(!is_reserved_file_name("intro.htm"));
/// ```
#[must_use]
pub fn is_reserved_file_name(name: &str) -> bool {
    name.eq_ignore_ascii_case(INITIAL_SECTION_FILE_NAME)
        || name.eq_ignore_ascii_case(EMBEDDED_CSS_FILE_NAME)
}

/// Validate a heading level used as split limit.
///
/// # Examples
/// ```
/// use chm_splitter::config::validate_heading_level;
///
/// assert!(validate_heading_level(1).is_ok());
/// assert!(validate_heading_level(6).is_ok());
/// assert!(validate_heading_level(0).is_err());
/// assert!(validate_heading_level(7).is_err());
/// ```
pub fn validate_heading_level(level: u8) -> Result<()> {
    if (1..=MAX_HEADING_LEVEL).contains(&level) {
        Ok(())
    } else {
        Err(SplitterError::InvalidHeadingLevel(level))
    }
}

/// Validate that an existing path can receive the split files.
pub fn validate_output_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SplitterError::OutputDirectory {
            path: path.to_path_buf(),
            reason: "does not exist".to_string(),
        });
    }
    if !path.is_dir() {
        return Err(SplitterError::OutputDirectory {
            path: path.to_path_buf(),
            reason: "is not a directory".to_string(),
        });
    }
    Ok(())
}

/// Options controlling how the source document is structured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitOptions {
    /// Deepest heading level that opens a new section.
    ///
    /// Deeper headings stay inline in the enclosing section's page.
    pub max_split_level: u8,

    /// Title overriding the one found in the document `<title>`.
    pub title: Option<String>,
}

impl SplitOptions {
    /// Create options that split at every heading level.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_split_level: MAX_HEADING_LEVEL,
            title: None,
        }
    }

    /// Set the deepest heading level that opens a section.
    pub fn with_max_split_level(mut self, level: u8) -> Result<Self> {
        validate_heading_level(level)?;
        self.max_split_level = level;
        Ok(self)
    }

    /// Set the document title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self::new()
    }
}
