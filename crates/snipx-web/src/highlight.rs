//! Syntax highlighting for the single-snippet page

use maud::html;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Turns a snippet body into HTML, keyed by language slug
pub trait Highlighter: Send + Sync {
    fn highlight(&self, code: &str, slug: &str) -> String;
}

/// HTML-escaped `<pre>` block with no colouring
fn escaped_pre(code: &str) -> String {
    html! { pre.code { (code) } }.into_string()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _slug: &str) -> String {
        escaped_pre(code)
    }
}

/// Slugs whose syntect token differs from the slug itself
const SLUG_ALIASES: &[(&str, &str)] = &[
    ("csharp", "cs"),
    ("objective-c", "m"),
    ("javascript", "js"),
    ("typescript", "ts"),
    ("shell", "sh"),
    ("bash", "sh"),
    ("golang", "go"),
    ("plain", "txt"),
];

pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub const DEFAULT_THEME: &'static str = "InspiredGitHub";

    /// Bundled syntaxes with the bundled `InspiredGitHub` theme
    pub fn new() -> Self {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(Self::DEFAULT_THEME)
            .unwrap_or_default();
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            theme,
        }
    }

    fn syntax_for(&self, slug: &str) -> &SyntaxReference {
        let token = SLUG_ALIASES
            .iter()
            .find(|(alias, _)| *alias == slug)
            .map(|(_, token)| *token)
            .unwrap_or(slug);
        self.syntaxes
            .find_syntax_by_token(token)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, slug: &str) -> String {
        let syntax = self.syntax_for(slug);
        match highlighted_html_for_string(code, &self.syntaxes, syntax, &self.theme) {
            Ok(html) => html,
            Err(err) => {
                tracing::warn!(language_slug = slug, error = %err, "highlighting failed");
                escaped_pre(code)
            }
        }
    }
}
