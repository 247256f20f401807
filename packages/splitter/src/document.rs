//! The parsed help document and its save operation.

use std::path::Path;

use crate::config::{validate_output_dir, SplitOptions, DEFAULT_TITLE, EMBEDDED_CSS_FILE_NAME};
use crate::error::Result;
use crate::html::{body_inner_html, SourceDocument};
use crate::output::{ContentSplitter, PageDecorator, SearchIndexer};
use crate::structure::{
    build_index_paths, first_node_with_content, list_generated_file_names, search_by_title,
    ContentSegment, NodePath, SectionNode, TreeBuilder,
};

/// A source document structured as a section tree, ready to be split.
///
/// The document owns the tree. The title index refers into it by path and
/// is rebuilt whenever the tree changes.
#[derive(Debug, Clone)]
pub struct ChmDocument {
    root: SectionNode,
    index: Vec<NodePath>,
    embedded_styles: Option<String>,
    title: String,
    styles_saved: bool,
}

impl ChmDocument {
    /// Parse an HTML document into sections.
    ///
    /// The title comes from `options.title`, then from the document's
    /// `<title>`, then falls back to the default help title.
    #[must_use]
    pub fn parse(html: &str, options: &SplitOptions) -> Self {
        let source = SourceDocument::parse(html);
        let title = options
            .title
            .clone()
            .or_else(|| source.title())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let segments = source.segments(options);

        tracing::debug!(segments = segments.len(), title = %title, "Parsed source document");
        Self::from_parts(segments, source.embedded_styles(), title)
    }

    /// Build a document from already extracted segments.
    #[must_use]
    pub fn from_parts(
        segments: impl IntoIterator<Item = ContentSegment>,
        embedded_styles: Option<String>,
        title: impl Into<String>,
    ) -> Self {
        let root = TreeBuilder::build(segments);
        let mut document = Self {
            root,
            index: Vec::new(),
            embedded_styles,
            title: title.into(),
            styles_saved: false,
        };
        document.rebuild_index();
        document
    }

    /// Root of the section tree.
    #[must_use]
    pub fn root(&self) -> &SectionNode {
        &self.root
    }

    /// Document title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// CSS of the embedded style block, if the source had a usable one.
    #[must_use]
    pub fn embedded_styles(&self) -> Option<&str> {
        self.embedded_styles.as_deref()
    }

    /// Every section except the root, sorted by title ignoring case.
    #[must_use]
    pub fn index(&self) -> Vec<&SectionNode> {
        self.index
            .iter()
            .filter_map(|path| self.root.get(path))
            .collect()
    }

    /// First section in document order whose title matches, ignoring case.
    #[must_use]
    pub fn search_by_title(&self, title: &str) -> Option<&SectionNode> {
        search_by_title(&self.root, title)
    }

    /// Names of all files written by [`Self::save_content_files`], in
    /// document order. Empty before saving.
    #[must_use]
    pub fn generated_file_names(&self) -> Vec<String> {
        let mut names = list_generated_file_names(&self.root);
        if self.styles_saved {
            names.push(EMBEDDED_CSS_FILE_NAME.to_string());
        }
        names
    }

    /// First node in document order with content of its own, the root
    /// included.
    #[must_use]
    pub fn first_node_with_content(&self) -> Option<&SectionNode> {
        first_node_with_content(&self.root)
    }

    /// Body markup of the first page, with `about:blank` and `about:` link
    /// prefixes removed.
    ///
    /// After saving this is the decorated page's body; before, the section's
    /// raw markup.
    #[must_use]
    pub fn first_split_content(&self) -> Option<String> {
        let node = self.first_node_with_content()?;
        let html = match node.split_content() {
            Some(page) => body_inner_html(page),
            None => node.page_html(),
        };
        Some(html.replace("about:blank", "").replace("about:", ""))
    }

    /// Whether the document has no sections. Content before the first
    /// heading does not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children().is_empty()
    }

    /// Write one page per section with content, plus the embedded
    /// stylesheet, into `directory`.
    ///
    /// Every page goes through `decorator`, then to `indexer` when given.
    /// Returns the written file names in write order.
    pub fn save_content_files(
        &mut self,
        directory: &Path,
        decorator: &dyn PageDecorator,
        indexer: Option<&mut dyn SearchIndexer>,
    ) -> Result<Vec<String>> {
        validate_output_dir(directory)?;

        let indexer = indexer.map(|indexer| indexer as &mut dyn SearchIndexer);
        let saved = ContentSplitter::new(directory, decorator, indexer)
            .with_start_title(self.title.clone())
            .save_all(&mut self.root, self.embedded_styles.as_deref())?;

        self.styles_saved = saved.iter().any(|name| name == EMBEDDED_CSS_FILE_NAME);
        self.rebuild_index();
        Ok(saved)
    }

    fn rebuild_index(&mut self) {
        self.index = build_index_paths(&self.root);
        tracing::trace!(entries = self.index.len(), "Rebuilt section index");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{StandardPageDecorator, TextIndexer};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::tempdir;

    const THREE_SECTIONS: &str = "<html><head><title>Manual</title></head><body>\
        <h1>Intro</h1><p>i</p><h2>Details</h2><p>d</p><h1>Conclusion</h1><p>c</p>\
        </body></html>";

    fn titles(nodes: &[&SectionNode]) -> Vec<String> {
        nodes.iter().map(|n| n.title().to_string()).collect()
    }

    #[test]
    fn test_parse_builds_tree_and_index() {
        let document = ChmDocument::parse(THREE_SECTIONS, &SplitOptions::new());

        assert_eq!(document.title(), "Manual");
        let root = document.root();
        assert_eq!(root.children().len(), 2);
        assert_eq!(root.children()[0].title(), "Intro");
        assert_eq!(root.children()[0].children()[0].title(), "Details");
        assert_eq!(root.children()[1].title(), "Conclusion");
        assert_eq!(titles(&document.index()), vec!["Conclusion", "Details", "Intro"]);
    }

    #[test]
    fn test_save_three_sections() {
        let dir = tempdir().unwrap();
        let mut document = ChmDocument::parse(THREE_SECTIONS, &SplitOptions::new());

        let saved = document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), None)
            .unwrap();

        assert_eq!(saved, vec!["intro.htm", "details.htm", "conclusion.htm"]);
        assert_eq!(document.generated_file_names(), saved);
        assert_eq!(titles(&document.index()), vec!["Conclusion", "Details", "Intro"]);
    }

    #[test]
    fn test_style_only_document() {
        let dir = tempdir().unwrap();
        let html = "<html><head><style>body{color:red}</style></head><body><p>only text</p></body></html>";
        let mut document = ChmDocument::parse(html, &SplitOptions::new());

        assert!(document.is_empty());
        assert!(document.index().is_empty());
        assert_eq!(document.embedded_styles(), Some("body{color:red}"));
        assert_eq!(document.title(), "Help content");

        let saved = document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), None)
            .unwrap();
        assert_eq!(saved, vec!["start.htm", "embeddedstyles.css"]);
        assert_eq!(document.generated_file_names(), saved);
        assert_eq!(
            fs::read_to_string(dir.path().join("embeddedstyles.css")).unwrap(),
            "body{color:red}"
        );
    }

    #[test]
    fn test_two_sections_without_preface() {
        let dir = tempdir().unwrap();
        let html = "<body><h1>A</h1><p>x</p><h2>B</h2><p>y</p></body>";
        let mut document = ChmDocument::parse(html, &SplitOptions::new());

        let saved = document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), None)
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert!(!saved.iter().any(|name| name == "start.htm"));
        assert!(!dir.path().join("start.htm").exists());
    }

    #[test]
    fn test_search_by_title_ignores_case() {
        let html = "<body><h1>chapter one</h1><p>x</p><h1>Chapter Two</h1></body>";
        let document = ChmDocument::parse(html, &SplitOptions::new());

        let found = document.search_by_title("Chapter One").unwrap();
        assert_eq!(found.title(), "chapter one");
        assert!(document.search_by_title("Chapter Three").is_none());
        assert!(document.search_by_title("").is_none());
    }

    #[test]
    fn test_generated_file_names_match_sections_with_content() {
        let dir = tempdir().unwrap();
        let html = "<html><head><style><!-- p{margin:0} --></style></head><body>\
            <p>cover</p><h1>Part</h1><h2>Notes</h2><p>1</p><h2>Notes</h2><p>2</p>\
            <h3>Deep</h3><p>3</p><h1>Empty</h1></body></html>";
        let mut document = ChmDocument::parse(html, &SplitOptions::new());
        let saved = document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), None)
            .unwrap();

        let names = document.generated_file_names();
        let distinct: HashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());

        let with_content = document
            .root()
            .pre_order()
            .filter(|(_, node)| node.has_content())
            .count();
        assert_eq!(names.len(), with_content + 1);
        assert_eq!(names, saved);
    }

    #[test]
    fn test_indexer_receives_pages() {
        let dir = tempdir().unwrap();
        let mut indexer = TextIndexer::new();
        let mut document = ChmDocument::parse(THREE_SECTIONS, &SplitOptions::new());

        document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), Some(&mut indexer))
            .unwrap();

        let titles: Vec<&str> = indexer.pages().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Intro", "Details", "Conclusion"]);
    }

    #[test]
    fn test_first_split_content_strips_about_links() {
        let dir = tempdir().unwrap();
        let html = r#"<body><h1>Links</h1><p><a href="about:blank#top">a</a> <a href="about:other.htm">b</a></p></body>"#;
        let mut document = ChmDocument::parse(html, &SplitOptions::new());

        let before = document.first_split_content().unwrap();
        assert!(before.starts_with("<h1>Links</h1>"));
        assert!(before.contains(r##"href="#top""##));
        assert!(before.contains(r#"href="other.htm""#));

        document
            .save_content_files(dir.path(), &StandardPageDecorator::new(), None)
            .unwrap();
        let after = document.first_split_content().unwrap();
        assert!(!after.contains("about:"));
        assert!(!after.contains("<title>"));
        assert!(after.contains("<h1>Links</h1>"));
    }

    #[test]
    fn test_empty_input() {
        let document = ChmDocument::parse("", &SplitOptions::new());
        assert!(document.is_empty());
        assert!(document.first_node_with_content().is_none());
        assert!(document.first_split_content().is_none());
        assert!(document.generated_file_names().is_empty());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let mut document = ChmDocument::parse(THREE_SECTIONS, &SplitOptions::new());
        let result = document.save_content_files(
            &dir.path().join("missing"),
            &StandardPageDecorator::new(),
            None,
        );
        assert!(matches!(
            result,
            Err(crate::error::SplitterError::OutputDirectory { .. })
        ));
    }

    #[test]
    fn test_title_override() {
        let options = SplitOptions::new().with_title("Override");
        let document = ChmDocument::parse(THREE_SECTIONS, &options);
        assert_eq!(document.title(), "Override");
    }

    #[test]
    fn test_max_split_level_keeps_deep_headings_inline() {
        let options = SplitOptions::new().with_max_split_level(1).unwrap();
        let document = ChmDocument::parse(THREE_SECTIONS, &options);
        assert_eq!(titles(&document.index()), vec!["Conclusion", "Intro"]);
        assert!(document.root().children()[0].body().contains("<h2>Details</h2>"));
    }

    #[test]
    fn test_failed_save_lists_only_written_files() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("b.htm")).unwrap();
        let html = "<body><h1>A</h1><p>a</p><h1>B</h1><p>b</p><h1>C</h1><p>c</p></body>";
        let mut document = ChmDocument::parse(html, &SplitOptions::new());

        let result = document.save_content_files(dir.path(), &StandardPageDecorator::new(), None);
        assert!(matches!(result, Err(crate::error::SplitterError::Write { .. })));

        let names = document.generated_file_names();
        assert_eq!(names, vec!["a.htm"]);
        for name in &names {
            assert!(dir.path().join(name).is_file(), "{name} not written");
        }
    }
}
