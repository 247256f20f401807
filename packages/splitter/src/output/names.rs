//! Destination file name allocation.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::{is_reserved_file_name, FALLBACK_SLUG, MAX_SLUG_LEN, PAGE_EXTENSION};

/// Regex for slug generation - matches runs of non-alphanumeric characters.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Generate an ASCII, filesystem-safe slug from a section title.
///
/// Accents are folded away, everything else outside `[a-z0-9]` becomes a
/// single dash, and the result is cut to a bounded length.
///
/// # Examples
/// ```
/// use chm_splitter::output::slugify;
///
/// assert_eq!(slugify("1.2 Getting Started!"), "1-2-getting-started");
/// assert_eq!(slugify("Introducción"), "introduccion");
/// assert_eq!(slugify("???"), "section");
/// ```
#[must_use]
pub fn slugify(title: &str) -> String {
    let folded: String = title
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_ascii_lowercase();
    let slug = SLUG_SEPARATORS.replace_all(&folded, "-");
    let slug = slug.trim_matches('-');

    // ASCII only at this point, so byte slicing is safe
    let slug = if slug.len() > MAX_SLUG_LEN {
        slug[..MAX_SLUG_LEN].trim_end_matches('-')
    } else {
        slug
    };

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Hands out unique page file names for one split run.
///
/// Names derive from the title slug; a repeated slug gets `-2`, `-3`, ...
/// appended. Uniqueness is checked case-insensitively and the reserved
/// start page and stylesheet names are never handed out.
#[derive(Debug, Default)]
pub struct FileNameAllocator {
    used: HashSet<String>,
}

impl FileNameAllocator {
    /// Create an allocator with only the reserved names taken.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh file name for a section title.
    pub fn allocate(&mut self, title: &str) -> String {
        let slug = slugify(title);
        let mut candidate = format!("{slug}.{PAGE_EXTENSION}");
        let mut suffix = 2;
        while self.is_taken(&candidate) {
            candidate = format!("{slug}-{suffix}.{PAGE_EXTENSION}");
            suffix += 1;
        }
        self.used.insert(candidate.to_ascii_lowercase());
        candidate
    }

    /// Mark a name as in use without allocating it. Returns `false` when it
    /// was already taken.
    pub fn reserve(&mut self, name: &str) -> bool {
        !is_reserved_file_name(name) && self.used.insert(name.to_ascii_lowercase())
    }

    /// Whether a name has already been handed out or is reserved.
    #[must_use]
    pub fn is_taken(&self, name: &str) -> bool {
        is_reserved_file_name(name) || self.used.contains(&name.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Intro"), "intro");
        assert_eq!(slugify("  Chapter  One  "), "chapter-one");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
    }

    #[test]
    fn test_slugify_folds_accents_and_drops_other_scripts() {
        assert_eq!(slugify("Über Größe"), "uber-groe");
        assert_eq!(slugify("日本語"), "section");
    }

    #[test]
    fn test_slugify_is_bounded() {
        let slug = slugify(&"word ".repeat(40));
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_duplicate_titles_get_suffixes() {
        let mut names = FileNameAllocator::new();
        assert_eq!(names.allocate("Notes"), "notes.htm");
        assert_eq!(names.allocate("Notes"), "notes-2.htm");
        assert_eq!(names.allocate("NOTES"), "notes-3.htm");
    }

    #[test]
    fn test_suffix_skips_names_taken_by_other_titles() {
        let mut names = FileNameAllocator::new();
        assert_eq!(names.allocate("Intro 2"), "intro-2.htm");
        assert_eq!(names.allocate("Intro"), "intro.htm");
        assert_eq!(names.allocate("Intro"), "intro-3.htm");
    }

    #[test]
    fn test_reserved_names_are_never_allocated() {
        let mut names = FileNameAllocator::new();
        assert!(names.is_taken("start.htm"));
        assert_eq!(names.allocate("Start"), "start-2.htm");
        assert!(names.is_taken("EmbeddedStyles.css"));
    }

    #[test]
    fn test_allocation_is_deterministic() {
        let titles = ["A", "B", "A", "a", "Start"];
        let first: Vec<String> = {
            let mut names = FileNameAllocator::new();
            titles.iter().map(|t| names.allocate(t)).collect()
        };
        let second: Vec<String> = {
            let mut names = FileNameAllocator::new();
            titles.iter().map(|t| names.allocate(t)).collect()
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_reserved_names_are_skipped_by_allocate() {
        let mut names = FileNameAllocator::new();
        assert!(names.reserve("Intro.htm"));
        assert!(!names.reserve("intro.htm"));
        assert!(!names.reserve("START.HTM"));
        assert_eq!(names.allocate("Intro"), "intro-2.htm");
    }
}
