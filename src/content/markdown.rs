//! Markdown rendering with syntax highlighting

use anyhow::{anyhow, Result};
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Highlight theme used when none is configured
pub const DEFAULT_THEME: &str = "InspiredGitHub";

/// Markdown renderer with one fixed rendering profile.
///
/// Raw HTML in the source is passed through untouched.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl MarkdownRenderer {
    #[cfg(test)]
    fn new() -> Result<Self> {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Create a renderer highlighting code with one of syntect's bundled themes
    pub fn with_theme(theme: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = themes
            .remove(theme)
            .ok_or_else(|| anyhow!("unknown highlight theme {:?}", theme))?;

        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM
    }

    /// Render Markdown source to HTML.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    pub fn render(&self, source: &[u8]) -> String {
        let markdown = String::from_utf8_lossy(source);
        let parser = Parser::new_ext(&markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a fenced block that names a language
        let mut code_block: Option<String> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                    if !lang.is_empty() =>
                {
                    let lang = lang.split_whitespace().next().unwrap_or_default();
                    code_block = Some(lang.to_string());
                    code.clear();
                }
                Event::Text(text) if code_block.is_some() => code.push_str(&text),
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    let lang = code_block.take().unwrap_or_default();
                    events.push(Event::Html(CowStr::from(self.highlight_code(&code, &lang))));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => format!(
                r#"<div class="highlight language-{}">{}</div>"#,
                html_escape(lang),
                highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape(lang),
                    html_escape(code)
                )
            }
        }
    }
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
