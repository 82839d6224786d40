//! markdir: serve a directory of Markdown documents as HTML
//!
//! Paths ending in `.md` or `.markdown`, and directories holding an index
//! document such as `README.md`, are converted to HTML and wrapped in a page
//! template. Every other path is served as a plain static file.

pub mod config;
pub mod content;
pub mod error;
pub mod server;
pub mod templates;

use anyhow::Result;

/// The main markdir application
#[derive(Debug, Clone)]
pub struct Markdir {
    /// Server configuration
    pub config: config::ServerConfig,
    /// Resolved content root
    pub root: content::ContentRoot,
    /// Where the page template is read from
    pub template: templates::TemplateSource,
}

impl Markdir {
    /// Resolve a configuration into everything the server needs.
    ///
    /// This is the only place the content root and template source are
    /// decided; request handling never consults the environment.
    pub fn new(config: config::ServerConfig) -> Result<Self> {
        config.validate()?;

        let root = content::ContentRoot::resolve(&config.root)?;
        let code_root = content::code_root()?;
        let template = templates::TemplateSource::resolve(config.template.as_deref(), &code_root);

        Ok(Self {
            config,
            root,
            template,
        })
    }

    /// Serve until the process is stopped
    pub async fn serve(&self) -> Result<()> {
        server::start(self).await
    }
}
