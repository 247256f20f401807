//! End-to-end split of a source file into a help package directory.

use std::path::{Path, PathBuf};

use crate::config::{SplitOptions, EMBEDDED_CSS_FILE_NAME, SEARCH_INDEX_FILE_NAME};
use crate::document::ChmDocument;
use crate::error::{Result, SplitterError};
use crate::output::{build_toc, save_toc, SearchIndexer, StandardPageDecorator, TextIndexer};

/// Summary of a finished split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitReport {
    /// Document title used for the start page and the table of contents.
    pub title: String,
    /// Number of sections below the root.
    pub sections: usize,
    /// Written page and stylesheet names, in write order.
    pub files: Vec<String>,
    /// Path of the table of contents manifest.
    pub toc_path: PathBuf,
    /// Path of the search index, when one was written.
    pub search_index_path: Option<PathBuf>,
}

/// Read a source document.
///
/// Word and older help tools do not always produce valid UTF-8; invalid
/// sequences are replaced and reported instead of failing the run.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| SplitterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(html) => Ok(html),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "Source is not valid UTF-8, invalid bytes replaced"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Split `input` into pages in `output`, then write the table of contents
/// and, if asked for, the search index.
///
/// `output` must exist. Pages link the embedded stylesheet when the source
/// has one.
pub fn split_file(
    input: &Path,
    output: &Path,
    options: &SplitOptions,
    write_search_index: bool,
) -> Result<SplitReport> {
    let html = read_source(input)?;
    let mut document = ChmDocument::parse(&html, options);

    let mut decorator = StandardPageDecorator::new();
    if document.embedded_styles().is_some() {
        decorator = decorator.with_stylesheet(EMBEDDED_CSS_FILE_NAME);
    }

    let mut indexer = TextIndexer::new();
    let files = {
        let indexer: Option<&mut dyn SearchIndexer> =
            write_search_index.then_some(&mut indexer as &mut dyn SearchIndexer);
        document.save_content_files(output, &decorator, indexer)?
    };

    let toc_path = save_toc(&build_toc(document.root(), document.title()), output)?;

    let search_index_path = if write_search_index {
        let path = output.join(SEARCH_INDEX_FILE_NAME);
        indexer.save(&path)?;
        Some(path)
    } else {
        None
    };

    tracing::info!(
        input = %input.display(),
        files = files.len(),
        "Split help document"
    );

    Ok(SplitReport {
        title: document.title().to_string(),
        sections: document.index().len(),
        files,
        toc_path,
        search_index_path,
    })
}
