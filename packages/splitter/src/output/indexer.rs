//! Search indexing sink for saved pages.

use std::path::Path;

use serde::Serialize;

use super::write::write_atomic;
use crate::error::{Result, SplitterError};
use crate::html::plain_text;

/// Receives every saved page, in split order, for full-text indexing.
pub trait SearchIndexer {
    /// Index one saved page.
    fn add_page(&mut self, file_name: &str, title: &str, html: &str) -> Result<()>;
}

/// One indexed page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexedPage {
    /// Page file name, relative to the output directory.
    pub file: String,
    /// Section title.
    pub title: String,
    /// Visible text of the page.
    pub text: String,
}

/// Indexer that keeps the plain text of every page in memory and can dump
/// it as YAML for an external search tool.
#[derive(Debug, Default)]
pub struct TextIndexer {
    pages: Vec<IndexedPage>,
}

impl TextIndexer {
    /// Create an empty indexer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages indexed so far, in split order.
    #[must_use]
    pub fn pages(&self) -> &[IndexedPage] {
        &self.pages
    }

    /// Serialize the index as a YAML document.
    pub fn to_yaml(&self) -> Result<String> {
        let yaml = serde_yaml_ng::to_string(&self.pages)?;
        Ok(format!("---\n{yaml}"))
    }

    /// Write the index as YAML.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_atomic(path, &self.to_yaml()?)
    }
}

impl SearchIndexer for TextIndexer {
    fn add_page(&mut self, file_name: &str, title: &str, html: &str) -> Result<()> {
        if self.pages.iter().any(|page| page.file == file_name) {
            return Err(SplitterError::Indexing {
                file_name: file_name.to_string(),
                message: "page already indexed".to_string(),
            });
        }
        self.pages.push(IndexedPage {
            file: file_name.to_string(),
            title: title.to_string(),
            text: plain_text(html),
        });
        Ok(())
    }
}
