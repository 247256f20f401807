//! Builds the section tree from the flat segment sequence.

use super::node::SectionNode;
use super::types::ContentSegment;
use crate::config::MAX_HEADING_LEVEL;

/// Single-pass tree builder.
///
/// Keeps an explicit stack of the sections that are still open. The bottom
/// of the stack is always the root; each entry is strictly deeper than the
/// one below it. Closing a section moves it into its parent's children.
pub struct TreeBuilder {
    open: Vec<SectionNode>,
}

impl TreeBuilder {
    /// Create a builder holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: vec![SectionNode::root()],
        }
    }

    /// Build a tree from a complete segment sequence.
    #[must_use]
    pub fn build(segments: impl IntoIterator<Item = ContentSegment>) -> SectionNode {
        let mut builder = Self::new();
        for segment in segments {
            builder.push(segment);
        }
        builder.finish()
    }

    /// Feed the next segment.
    ///
    /// A heading of level L closes every open section of level >= L and
    /// opens a child of the section left on top. Skipped levels are not
    /// filled in. Content goes to the innermost open section, which is the
    /// root until the first heading appears.
    pub fn push(&mut self, segment: ContentSegment) {
        match segment {
            ContentSegment::Heading { level, title, html }
                if (1..=MAX_HEADING_LEVEL).contains(&level) =>
            {
                while self.top_level() >= level {
                    self.close_top();
                }
                tracing::trace!(level, title = %title, depth = self.open.len(), "Opening section");
                self.open.push(SectionNode::new(title, level, html));
            }
            ContentSegment::Heading { level, html, .. } => {
                tracing::warn!(level, "Heading level out of range, keeping it as content");
                self.current_mut().append_body(&html);
            }
            ContentSegment::Content(html) => self.current_mut().append_body(&html),
        }
    }

    /// Close every open section and return the root.
    #[must_use]
    pub fn finish(mut self) -> SectionNode {
        while self.open.len() > 1 {
            self.close_top();
        }
        self.open.pop().unwrap_or_else(SectionNode::root)
    }

    fn top_level(&self) -> u8 {
        self.open.last().map_or(0, SectionNode::heading_level)
    }

    fn current_mut(&mut self) -> &mut SectionNode {
        if self.open.is_empty() {
            self.open.push(SectionNode::root());
        }
        let last = self.open.len() - 1;
        &mut self.open[last]
    }

    /// Pop the innermost section into its parent. The root is never popped.
    fn close_top(&mut self) {
        if self.open.len() < 2 {
            return;
        }
        if let Some(node) = self.open.pop() {
            self.current_mut().push_child(node);
        }
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heading(level: u8, title: &str) -> ContentSegment {
        ContentSegment::heading(level, title, format!("<h{level}>{title}</h{level}>"))
    }

    fn content(text: &str) -> ContentSegment {
        ContentSegment::content(format!("<p>{text}</p>"))
    }

    fn titles(node: &SectionNode) -> Vec<&str> {
        node.children().iter().map(SectionNode::title).collect()
    }

    fn assert_levels_increase(node: &SectionNode) {
        for child in node.children() {
            assert!(
                child.heading_level() > node.heading_level(),
                "{} (level {}) under {} (level {})",
                child.title(),
                child.heading_level(),
                node.title(),
                node.heading_level()
            );
            assert_levels_increase(child);
        }
    }

    #[test]
    fn test_nested_headings() {
        let root = TreeBuilder::build([
            heading(1, "Intro"),
            content("a"),
            heading(2, "Details"),
            content("b"),
            heading(1, "Conclusion"),
            content("c"),
        ]);

        assert_eq!(titles(&root), vec!["Intro", "Conclusion"]);
        assert_eq!(titles(&root.children()[0]), vec!["Details"]);
        assert_eq!(root.children()[0].body(), "<p>a</p>\n");
        assert_eq!(root.children()[0].children()[0].body(), "<p>b</p>\n");
        assert!(!root.has_content());
    }

    #[test]
    fn test_content_before_first_heading_goes_to_root() {
        let root = TreeBuilder::build([content("preface"), heading(1, "One")]);
        assert_eq!(root.body(), "<p>preface</p>\n");
        assert_eq!(titles(&root), vec!["One"]);
    }

    #[test]
    fn test_skipped_level_is_not_synthesized() {
        let root = TreeBuilder::build([heading(1, "A"), heading(3, "C"), heading(2, "B")]);
        let a = &root.children()[0];
        assert_eq!(titles(a), vec!["C", "B"]);
        assert_eq!(a.children()[0].heading_level(), 3);
    }

    #[test]
    fn test_same_level_headings_are_siblings() {
        let root = TreeBuilder::build([heading(2, "X"), heading(2, "Y"), heading(2, "Z")]);
        assert_eq!(titles(&root), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_shallower_heading_after_deep_nesting() {
        let root = TreeBuilder::build([
            heading(1, "A"),
            heading(2, "B"),
            heading(3, "C"),
            heading(4, "D"),
            heading(2, "E"),
        ]);
        let a = &root.children()[0];
        assert_eq!(titles(a), vec!["B", "E"]);
        assert_eq!(root.node_count(), 6);
    }

    #[test]
    fn test_non_monotonic_sequence_keeps_level_invariant() {
        let root = TreeBuilder::build([
            heading(3, "deep first"),
            heading(1, "top"),
            heading(6, "very deep"),
            heading(2, "mid"),
            heading(5, "deeper"),
            heading(4, "less deep"),
            heading(1, "top again"),
        ]);
        assert_levels_increase(&root);
        assert_eq!(titles(&root), vec!["deep first", "top", "top again"]);
    }

    #[test]
    fn test_out_of_range_level_becomes_content() {
        let root = TreeBuilder::build([heading(1, "A"), heading(0, "bogus")]);
        assert_eq!(root.children()[0].children().len(), 0);
        assert!(root.children()[0].body().contains("bogus"));
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let root = TreeBuilder::build([]);
        assert!(root.is_root());
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_builders_do_not_share_state() {
        let first = TreeBuilder::build([heading(1, "A"), heading(2, "B")]);
        let second = TreeBuilder::build([content("only")]);
        assert_eq!(first.node_count(), 3);
        assert_eq!(second.node_count(), 1);
        assert!(second.has_content());
    }
}
