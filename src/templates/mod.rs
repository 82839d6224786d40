//! Page template rendering using the Tera template engine
//!
//! A page template sees exactly two variables: `title`, which is escaped, and
//! `body`, the rendered Markdown, which the template must mark `safe`.

use anyhow::{Context as _, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// Template bundled into the binary
const EMBEDDED_PAGE: &str = include_str!("page.html");

/// Registered name; the `.html` suffix turns Tera's autoescaping on
const PAGE_TEMPLATE: &str = "page.html";

/// Where the page template comes from, decided once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template compiled into the binary
    Embedded,
    /// A template file on disk
    File(PathBuf),
}

impl TemplateSource {
    /// Pick the template source from an optional configured path.
    ///
    /// Relative paths resolve against `code_root`.
    pub fn resolve(configured: Option<&Path>, code_root: &Path) -> Self {
        match configured {
            Some(path) if path.is_absolute() => Self::File(path.to_path_buf()),
            Some(path) => Self::File(code_root.join(path)),
            None => Self::Embedded,
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Embedded => write!(f, "embedded"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A page ready to be wrapped in the template
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub title: String,
    /// Trusted HTML, inserted without escaping
    pub body_html: String,
}

/// Wraps rendered Markdown in the page template
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Load and compile the page template
    pub fn new(source: &TemplateSource) -> Result<Self> {
        let template = match source {
            TemplateSource::Embedded => EMBEDDED_PAGE.to_string(),
            TemplateSource::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("could not read template {:?}", path))?,
        };

        let mut tera = Tera::default();
        tera.add_raw_template(PAGE_TEMPLATE, &template)
            .with_context(|| format!("could not parse {} template", source))?;

        Ok(Self { tera })
    }

    /// Render a complete HTML document
    pub fn render(&self, page: &RenderedPage) -> tera::Result<String> {
        let mut context = Context::new();
        context.insert("title", &page.title);
        context.insert("body", &page.body_html);
        self.tera.render(PAGE_TEMPLATE, &context)
    }
}
