//! Page decoration: turning a section fragment into a complete page.

use crate::html::escape_html;

/// Turns a section's HTML fragment into the page that gets written.
///
/// Called once per section with content. Implementations should be pure
/// transformations; closures taking `(body, title)` work as decorators.
pub trait PageDecorator {
    /// Produce the final page markup for a section.
    fn decorate(&self, body_html: &str, title: &str) -> String;
}

impl<F> PageDecorator for F
where
    F: Fn(&str, &str) -> String,
{
    fn decorate(&self, body_html: &str, title: &str) -> String {
        self(body_html, title)
    }
}

/// Plain page template: UTF-8 head, page title and an optional shared
/// stylesheet link around the untouched section markup.
#[derive(Debug, Clone, Default)]
pub struct StandardPageDecorator {
    stylesheet: Option<String>,
}

impl StandardPageDecorator {
    /// Create a decorator without stylesheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Link every page to a stylesheet in the output directory.
    #[must_use]
    pub fn with_stylesheet(mut self, file_name: impl Into<String>) -> Self {
        self.stylesheet = Some(file_name.into());
        self
    }
}

impl PageDecorator for StandardPageDecorator {
    fn decorate(&self, body_html: &str, title: &str) -> String {
        let mut page = String::with_capacity(body_html.len() + 256);
        page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        page.push_str("<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\">\n");
        page.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        if let Some(stylesheet) = &self.stylesheet {
            page.push_str(&format!(
                "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
                escape_html(stylesheet)
            ));
        }
        page.push_str("</head>\n<body>\n");
        page.push_str(body_html.trim_end());
        page.push_str("\n</body>\n</html>\n");
        page
    }
}
