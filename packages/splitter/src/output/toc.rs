//! Table of contents manifest and text outline.

use std::path::{Path, PathBuf};

use serde::Serialize;
use textwrap::{fill, Options};

use super::write::write_atomic;
use crate::config::TOC_FILE_NAME;
use crate::error::Result;
use crate::structure::SectionNode;

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    /// Section title.
    pub title: String,

    /// Page opened by the entry. Sections without own content point at
    /// their first written subsection; `None` before splitting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Nested entries.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    fn from_node(node: &SectionNode) -> Self {
        Self {
            title: node.title().to_string(),
            file: node.landing_file_name().map(str::to_string),
            children: node.children().iter().map(Self::from_node).collect(),
        }
    }
}

/// Build the table of contents for a section tree.
///
/// Content before the first heading shows up as a leading entry named
/// `start_title`.
#[must_use]
pub fn build_toc(root: &SectionNode, start_title: &str) -> Vec<TocEntry> {
    let mut entries = Vec::with_capacity(root.children().len() + 1);
    if root.has_content() {
        entries.push(TocEntry {
            title: start_title.to_string(),
            file: root.destination_file_name().map(str::to_string),
            children: Vec::new(),
        });
    }
    entries.extend(root.children().iter().map(TocEntry::from_node));
    entries
}

/// Serialize table of contents entries as a YAML document.
pub fn generate_toc_yaml(entries: &[TocEntry]) -> Result<String> {
    let yaml = serde_yaml_ng::to_string(entries)?;
    Ok(format!("---\n{yaml}"))
}

/// Write `toc.yaml` into the output directory.
pub fn save_toc(entries: &[TocEntry], directory: &Path) -> Result<PathBuf> {
    let path = directory.join(TOC_FILE_NAME);
    write_atomic(&path, &generate_toc_yaml(entries)?)?;
    Ok(path)
}

/// Render the section tree as an indented outline, wrapping long titles to
/// `width` columns.
#[must_use]
pub fn render_outline(root: &SectionNode, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    for (path, node) in root.pre_order() {
        if node.is_root() {
            continue;
        }
        let indent = "  ".repeat(path.len() - 1);
        let initial = format!("{indent}- ");
        let subsequent = format!("{indent}  ");
        let label = match node.destination_file_name() {
            Some(file) => format!("{} (h{}, {file})", node.title(), node.heading_level()),
            None => format!("{} (h{})", node.title(), node.heading_level()),
        };
        let options = Options::new(width.max(initial.len() + 8))
            .initial_indent(&initial)
            .subsequent_indent(&subsequent);
        lines.push(fill(&label, options));
    }

    lines.join("\n")
}
