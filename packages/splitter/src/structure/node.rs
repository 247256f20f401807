//! Section tree node.

/// Position of a node in the tree as child indices from the root.
///
/// The root itself has an empty path.
pub type NodePath = Vec<usize>;

/// One section of the document: a heading and the content up to the next
/// heading of the same or a shallower level.
///
/// Nodes own their children, so the tree has a single owner (the document)
/// and no sharing. A child's heading level is always strictly greater than
/// its parent's; the synthetic root sits at level 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionNode {
    title: String,
    heading_level: u8,
    heading_html: String,
    body: String,
    children: Vec<SectionNode>,
    destination_file_name: Option<String>,
    split_content: Option<String>,
}

impl SectionNode {
    /// Create the level 0 root. It has no title and no heading markup.
    #[must_use]
    pub fn root() -> Self {
        Self {
            title: String::new(),
            heading_level: 0,
            heading_html: String::new(),
            body: String::new(),
            children: Vec::new(),
            destination_file_name: None,
            split_content: None,
        }
    }

    /// Create a section opened by a heading.
    #[must_use]
    pub fn new(title: impl Into<String>, heading_level: u8, heading_html: impl Into<String>) -> Self {
        debug_assert!(heading_level > 0, "level 0 is reserved for the root");
        Self {
            title: title.into(),
            heading_level,
            heading_html: heading_html.into(),
            ..Self::root()
        }
    }

    /// Section title, taken from the heading text. Empty for the root.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Heading level (1-6), or 0 for the root.
    #[must_use]
    pub fn heading_level(&self) -> u8 {
        self.heading_level
    }

    /// Outer markup of the heading element that opened this section.
    #[must_use]
    pub fn heading_html(&self) -> &str {
        &self.heading_html
    }

    /// Raw HTML between this section's heading and the next heading.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Subsections in document order.
    #[must_use]
    pub fn children(&self) -> &[SectionNode] {
        &self.children
    }

    /// File the section was written to, once split.
    #[must_use]
    pub fn destination_file_name(&self) -> Option<&str> {
        self.destination_file_name.as_deref()
    }

    /// Decorated page written for this section, once split.
    #[must_use]
    pub fn split_content(&self) -> Option<&str> {
        self.split_content.as_deref()
    }

    /// Whether this is the synthetic root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.heading_level == 0
    }

    /// Whether the section has content of its own (not only subsections).
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.body.trim().is_empty()
    }

    /// Markup for the section's page: the heading followed by the body.
    #[must_use]
    pub fn page_html(&self) -> String {
        format!("{}{}", self.heading_html, self.body)
    }

    /// Number of nodes in this subtree, this node included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.pre_order().count()
    }

    /// Resolve a path relative to this node.
    #[must_use]
    pub fn get(&self, path: &[usize]) -> Option<&SectionNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children.get(index))
    }

    /// Iterate over this subtree in pre-order, yielding each node with its
    /// path relative to this node.
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            stack: vec![(Vec::new(), self)],
        }
    }

    /// File that should open when this section is selected.
    ///
    /// Sections without own content fall through to their first descendant
    /// that was written.
    #[must_use]
    pub fn landing_file_name(&self) -> Option<&str> {
        self.pre_order()
            .find_map(|(_, node)| node.destination_file_name())
    }

    pub(crate) fn append_body(&mut self, html: &str) {
        self.body.push_str(html);
        self.body.push('\n');
    }

    pub(crate) fn push_child(&mut self, child: SectionNode) {
        debug_assert!(
            child.heading_level > self.heading_level,
            "child level must be deeper than parent level"
        );
        self.children.push(child);
    }

    pub(crate) fn children_mut(&mut self) -> &mut [SectionNode] {
        &mut self.children
    }

    pub(crate) fn set_destination_file_name(&mut self, name: impl Into<String>) {
        self.destination_file_name = Some(name.into());
    }

    pub(crate) fn set_split_content(&mut self, html: impl Into<String>) {
        self.split_content = Some(html.into());
    }
}

/// Pre-order iterator over a section subtree.
pub struct PreOrder<'a> {
    stack: Vec<(NodePath, &'a SectionNode)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodePath, &'a SectionNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, node) = self.stack.pop()?;
        // Reverse so the first child is popped next
        for (index, child) in node.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(index);
            self.stack.push((child_path, child));
        }
        Some((path, node))
    }
}
