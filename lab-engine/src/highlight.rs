//! Syntax highlighting for disclosed source files

use crate::error::{LabError, LabResult};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::warn;

/// Theme used when none is configured; light background to match the page
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Source highlighter backed by syntect.
///
/// Loading the syntax and theme sets is expensive, so one instance is built
/// at startup and shared.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Use a named theme from the default set, falling back to `DEFAULT_THEME`
    pub fn with_theme(name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut theme_set = ThemeSet::load_defaults();
        let theme = match theme_set.themes.remove(name) {
            Some(theme) => theme,
            None => {
                warn!(theme = name, "Unknown highlight theme, using {}", DEFAULT_THEME);
                theme_set
                    .themes
                    .remove(DEFAULT_THEME)
                    .unwrap_or_default()
            }
        };

        Self { syntax_set, theme }
    }

    /// Highlight `code` as HTML, choosing the syntax by file extension
    pub fn try_highlight(&self, code: &str, extension: &str) -> LabResult<String> {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme)
            .map_err(|e| LabError::Highlight { reason: e.to_string() })
    }

    /// Like `try_highlight`, degrading to an escaped `<pre>` block on error
    pub fn highlight(&self, code: &str, extension: &str) -> String {
        match self.try_highlight(code, extension) {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Highlighting failed, rendering plain text");
                format!("<pre>{}</pre>", escape_html(code))
            }
        }
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script> & \"y\""),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; &quot;y&quot;"
        );
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let highlighter = Highlighter::new();
        let html = highlighter.highlight("let s = \"<script>\";\n", "rs");
        assert!(html.starts_with("<pre"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;"));
    }

    #[test]
    fn test_unknown_extension_uses_plain_text() {
        let highlighter = Highlighter::new();
        let html = highlighter.try_highlight("plain words\n", "zzz-unknown").unwrap();
        assert!(html.contains("plain words"));
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = Highlighter::with_theme("no-such-theme");
        assert!(highlighter.highlight("fn main() {}\n", "rs").contains("main"));
    }
}
