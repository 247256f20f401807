//! Error types for the splitter.
//!
//! Only filesystem and configuration problems are errors. Structural oddities
//! in the source document (skipped heading levels, empty sections, missing
//! style blocks) are handled in place and never surface here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Heading level outside the `1..=6` range HTML allows.
    #[error("Invalid heading level: {0}. Expected a value between 1 and 6")]
    InvalidHeadingLevel(u8),

    /// The output location is unusable.
    #[error("Invalid output directory {}: {reason}", .path.display())]
    OutputDirectory { path: PathBuf, reason: String },

    /// Reading the source document failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing one of the generated files failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The search indexer rejected a page.
    #[error("Indexing of {file_name} failed: {message}")]
    Indexing { file_name: String, message: String },

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
