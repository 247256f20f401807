//! Keeps intra-document links working after the document is split.
//!
//! In the source, a link like `href="#_Toc123"` points at an anchor
//! somewhere in the same file. After splitting, the anchor lives in some
//! other page, so the link has to name that page.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::structure::{NodePath, SectionNode};

/// `id` and `name` attributes, quoted or not.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANCHOR_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s(?:id|name)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("valid regex")
});

/// `href` attributes holding a bare fragment.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static FRAGMENT_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r##"(?i)\bhref\s*=\s*(?:"#([^"]+)"|'#([^']+)')"##).expect("valid regex")
});

/// Where an anchor ended up after splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTarget {
    /// Page holding (or standing in for) the anchor.
    pub file_name: String,
    /// Whether the anchor itself exists in that page.
    ///
    /// Anchors on headings of sections without own content are not written
    /// anywhere; links to them open a nearby page instead.
    pub has_fragment: bool,
}

/// Anchor name to destination page.
#[derive(Debug, Default)]
pub struct AnchorMap {
    targets: HashMap<String, AnchorTarget>,
}

impl AnchorMap {
    /// Collect the anchors of every section, given the page planned for
    /// each section path. The first definition of an anchor wins, matching
    /// browser behavior.
    ///
    /// A section without a page of its own stands in with its first
    /// subsection's page, then with the nearest ancestor's page.
    #[must_use]
    pub fn collect(root: &SectionNode, pages: &HashMap<NodePath, String>) -> Self {
        let mut map = Self::default();

        for (path, node) in root.pre_order() {
            let anchors = anchor_names(&node.page_html());
            if anchors.is_empty() {
                continue;
            }
            let Some(target) = target_for(&path, node, pages) else {
                tracing::debug!(title = %node.title(), "No page for section anchors");
                continue;
            };
            for anchor in anchors {
                map.targets.entry(anchor).or_insert_with(|| target.clone());
            }
        }

        tracing::debug!(anchors = map.len(), "Collected document anchors");
        map
    }

    /// Look up an anchor.
    #[must_use]
    pub fn get(&self, anchor: &str) -> Option<&AnchorTarget> {
        self.targets.get(anchor)
    }

    /// Number of known anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Whether no anchors are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Point fragment links in `html`, written to `current_file`, at the
    /// pages holding their anchors.
    ///
    /// Links to anchors in the same page and links to unknown anchors are
    /// left untouched.
    #[must_use]
    pub fn rewrite_links(&self, html: &str, current_file: &str) -> String {
        if self.is_empty() {
            return html.to_string();
        }

        FRAGMENT_HREF
            .replace_all(html, |caps: &Captures<'_>| {
                let original = caps.get(0).map_or("", |m| m.as_str()).to_string();
                let Some(anchor) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()) else {
                    return original;
                };
                match self.get(anchor) {
                    Some(target) if target.file_name != current_file => {
                        if target.has_fragment {
                            format!("href=\"{}#{anchor}\"", target.file_name)
                        } else {
                            format!("href=\"{}\"", target.file_name)
                        }
                    }
                    _ => original,
                }
            })
            .into_owned()
    }
}

fn target_for(
    path: &[usize],
    node: &SectionNode,
    pages: &HashMap<NodePath, String>,
) -> Option<AnchorTarget> {
    if let Some(file_name) = pages.get(path) {
        return Some(AnchorTarget {
            file_name: file_name.clone(),
            has_fragment: true,
        });
    }

    let landing = node.pre_order().find_map(|(relative, _)| {
        let mut full = path.to_vec();
        full.extend(relative);
        pages.get(&full)
    });
    let ancestor = || (0..path.len()).rev().find_map(|depth| pages.get(&path[..depth]));

    landing.or_else(ancestor).map(|file_name| AnchorTarget {
        file_name: file_name.clone(),
        has_fragment: false,
    })
}

/// Anchor names defined in a fragment, in order of appearance.
#[must_use]
pub fn anchor_names(html: &str) -> Vec<String> {
    ANCHOR_ATTRIBUTE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}
