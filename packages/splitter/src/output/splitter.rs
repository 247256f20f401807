//! Writes one page per section.

use std::collections::HashMap;
use std::path::Path;

use super::decorator::PageDecorator;
use super::indexer::SearchIndexer;
use super::links::AnchorMap;
use super::names::FileNameAllocator;
use super::write::write_atomic;
use crate::config::{DEFAULT_TITLE, EMBEDDED_CSS_FILE_NAME, INITIAL_SECTION_FILE_NAME};
use crate::error::Result;
use crate::structure::{NodePath, SectionNode};

/// Splits a section tree into page files in a destination directory.
///
/// One splitter serves one save run: it owns the name allocator, so names
/// are unique across everything it writes and nothing carries over between
/// runs. A section records its file name only once its page is on disk.
pub struct ContentSplitter<'a> {
    directory: &'a Path,
    decorator: &'a dyn PageDecorator,
    indexer: Option<&'a mut dyn SearchIndexer>,
    names: FileNameAllocator,
    planned: HashMap<NodePath, String>,
    anchors: AnchorMap,
    start_title: String,
}

impl<'a> ContentSplitter<'a> {
    /// Create a splitter writing into `directory`.
    pub fn new(
        directory: &'a Path,
        decorator: &'a dyn PageDecorator,
        indexer: Option<&'a mut dyn SearchIndexer>,
    ) -> Self {
        Self {
            directory,
            decorator,
            indexer,
            names: FileNameAllocator::new(),
            planned: HashMap::new(),
            anchors: AnchorMap::default(),
            start_title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Title of the start page holding the content before the first heading.
    #[must_use]
    pub fn with_start_title(mut self, title: impl Into<String>) -> Self {
        self.start_title = title.into();
        self
    }

    /// Write the page of a single section.
    ///
    /// Returns `None` without writing when the section has no content of its
    /// own. Children are not visited here.
    pub fn split(&mut self, node: &mut SectionNode) -> Result<Option<String>> {
        if !node.has_content() {
            tracing::trace!(title = %node.title(), "Section has no content, no page written");
            return Ok(None);
        }

        let file_name = match node.destination_file_name() {
            Some(name) => name.to_string(),
            None => self.name_for(node),
        };
        self.write_page(node, &file_name)?;
        Ok(Some(file_name))
    }

    /// Write every section page in pre-order, then the embedded stylesheet.
    ///
    /// Names are planned for the whole tree before anything is written so
    /// fragment links can be pointed at the right pages. The first failing
    /// write aborts the run and is returned; sections after it stay unnamed.
    pub fn save_all(
        &mut self,
        root: &mut SectionNode,
        embedded_styles: Option<&str>,
    ) -> Result<Vec<String>> {
        self.plan_file_names(root);
        self.anchors = AnchorMap::collect(root, &self.planned);

        let mut saved = Vec::new();
        self.save_subtree(root, &mut Vec::new(), &mut saved)?;

        if let Some(css) = embedded_styles.filter(|css| !css.trim().is_empty()) {
            write_atomic(&self.directory.join(EMBEDDED_CSS_FILE_NAME), css)?;
            tracing::debug!(file = EMBEDDED_CSS_FILE_NAME, "Wrote embedded stylesheet");
            saved.push(EMBEDDED_CSS_FILE_NAME.to_string());
        }

        tracing::info!(
            files = saved.len(),
            directory = %self.directory.display(),
            "Saved content files"
        );
        Ok(saved)
    }

    /// Pick a file name for every section with content, parents first.
    ///
    /// The root always gets the start page name. Sections already saved
    /// keep their name and it is never handed out again.
    fn plan_file_names(&mut self, root: &SectionNode) {
        self.planned.clear();
        for (path, node) in root.pre_order() {
            if let Some(name) = node.destination_file_name() {
                self.names.reserve(name);
                self.planned.insert(path, name.to_string());
            }
        }
        for (path, node) in root.pre_order() {
            if node.has_content() && !self.planned.contains_key(&path) {
                let name = self.name_for(node);
                self.planned.insert(path, name);
            }
        }
    }

    fn save_subtree(
        &mut self,
        node: &mut SectionNode,
        path: &mut NodePath,
        saved: &mut Vec<String>,
    ) -> Result<()> {
        if node.has_content() {
            if let Some(file_name) = self.planned.get(path.as_slice()).cloned() {
                self.write_page(node, &file_name)?;
                saved.push(file_name);
            }
        }
        for (index, child) in node.children_mut().iter_mut().enumerate() {
            path.push(index);
            self.save_subtree(child, path, saved)?;
            path.pop();
        }
        Ok(())
    }

    fn write_page(&mut self, node: &mut SectionNode, file_name: &str) -> Result<()> {
        let title = if node.is_root() {
            self.start_title.clone()
        } else {
            node.title().to_string()
        };

        let body = self.anchors.rewrite_links(&node.page_html(), file_name);
        let page = self.decorator.decorate(&body, &title);
        write_atomic(&self.directory.join(file_name), &page)?;

        node.set_destination_file_name(file_name);
        node.set_split_content(page.clone());
        tracing::debug!(file = %file_name, title = %title, bytes = page.len(), "Wrote section page");

        if let Some(indexer) = self.indexer.as_mut() {
            indexer.add_page(file_name, &title, &page)?;
        }
        Ok(())
    }

    fn name_for(&mut self, node: &SectionNode) -> String {
        if node.is_root() {
            INITIAL_SECTION_FILE_NAME.to_string()
        } else {
            self.names.allocate(node.title())
        }
    }
}
