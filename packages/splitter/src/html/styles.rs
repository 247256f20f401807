//! Embedded style block extraction.
//!
//! Word saves its paragraph and character styles in a `<style>` element in
//! the document head, wrapped in an HTML comment for old browsers. That CSS
//! is pulled out once and shared by every split page.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// CSS comments, removed before checking brace balance.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CSS_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"));

/// Find the embedded style block of a parsed document.
///
/// The first usable `<style>` in the head wins; further blocks are ignored.
/// A block that is empty or not well formed counts as absent.
#[must_use]
pub fn extract_embedded_styles(document: &Html) -> Option<String> {
    let selector = Selector::parse("head style").ok()?;
    let mut found: Option<String> = None;

    for style in document.select(&selector) {
        let raw: String = style.text().collect();
        let Some(css) = clean_style_block(&raw) else {
            tracing::debug!("Skipping unusable style block");
            continue;
        };
        if found.is_some() {
            tracing::warn!("Document has more than one embedded style block, keeping the first");
            break;
        }
        found = Some(css);
    }

    found
}

/// Strip the HTML comment wrapper from a style block and validate it.
///
/// # Examples
/// ```
/// use chm_splitter::html::clean_style_block;
///
/// assert_eq!(
///     clean_style_block("<!--\np.MsoNormal {margin:0cm;}\n-->").as_deref(),
///     Some("p.MsoNormal {margin:0cm;}")
/// );
/// assert!(clean_style_block("p { color: red").is_none());
/// ```
#[must_use]
pub fn clean_style_block(raw: &str) -> Option<String> {
    let css = raw.trim();
    let css = css.strip_prefix("<!--").unwrap_or(css);
    let css = css.strip_suffix("-->").unwrap_or(css).trim();

    if css.is_empty() || !is_well_formed(css) {
        return None;
    }
    Some(css.to_string())
}

/// At least one rule and balanced braces, comments ignored.
fn is_well_formed(css: &str) -> bool {
    let without_comments = CSS_COMMENT.replace_all(css, "");
    if without_comments.contains("/*") {
        return false;
    }

    let mut depth: usize = 0;
    let mut rules = 0;
    for ch in without_comments.chars() {
        match ch {
            '{' => {
                depth += 1;
                rules += 1;
            }
            '}' => {
                let Some(next) = depth.checked_sub(1) else {
                    return false;
                };
                depth = next;
            }
            _ => {}
        }
    }
    depth == 0 && rules > 0
}
