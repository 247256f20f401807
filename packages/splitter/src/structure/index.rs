//! Flat section index and tree queries.

use super::node::{NodePath, SectionNode};

/// Paths of every section below `root`, sorted by title.
///
/// The root is left out. Titles compare case-insensitively and equal titles
/// keep their document order.
#[must_use]
pub fn build_index_paths(root: &SectionNode) -> Vec<NodePath> {
    let mut entries: Vec<(NodePath, &SectionNode)> = root
        .pre_order()
        .filter(|(path, _)| !path.is_empty())
        .collect();
    // sort_by_cached_key is stable
    entries.sort_by_cached_key(|(_, node)| node.title().to_lowercase());
    entries.into_iter().map(|(path, _)| path).collect()
}

/// Every section below `root`, sorted by title. See [`build_index_paths`].
#[must_use]
pub fn build_index(root: &SectionNode) -> Vec<&SectionNode> {
    build_index_paths(root)
        .iter()
        .filter_map(|path| root.get(path))
        .collect()
}

/// First section in document order whose title matches, ignoring case.
#[must_use]
pub fn search_by_title<'a>(root: &'a SectionNode, title: &str) -> Option<&'a SectionNode> {
    let wanted = title.to_lowercase();
    root.pre_order()
        .map(|(_, node)| node)
        .find(|node| !node.is_root() && node.title().to_lowercase() == wanted)
}

/// Distinct destination file names in document order.
#[must_use]
pub fn list_generated_file_names(root: &SectionNode) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (_, node) in root.pre_order() {
        if let Some(name) = node.destination_file_name() {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// First node in document order carrying content of its own.
#[must_use]
pub fn first_node_with_content(root: &SectionNode) -> Option<&SectionNode> {
    root.pre_order()
        .map(|(_, node)| node)
        .find(|node| node.has_content())
}
