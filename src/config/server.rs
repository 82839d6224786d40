//! Server configuration (markdir.yml)

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use syntect::highlighting::ThemeSet;

use crate::content::{DEFAULT_INDEX_NAMES, DEFAULT_THEME};

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "markdir.yml";

/// Server configuration, resolved once before the server starts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind: String,
    /// Content root, `~` allowed
    pub root: String,
    /// Page template on disk; the embedded template is used when unset
    pub template: Option<PathBuf>,
    /// Index documents probed for directory requests, in order
    pub index_names: Vec<String>,
    /// syntect theme for fenced code blocks
    pub highlight_theme: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:19000".to_string(),
            root: ".".to_string(),
            template: None,
            index_names: DEFAULT_INDEX_NAMES.iter().map(|s| s.to_string()).collect(),
            highlight_theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("could not read config {:?}", path.as_ref()))?;
        let config: ServerConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {:?}", path.as_ref()))?;
        tracing::debug!("Loaded config from {:?}", path.as_ref());
        Ok(config)
    }

    /// Load `path` if given, else `markdir.yml` in `base_dir` if present,
    /// else the defaults
    pub fn discover(path: Option<&Path>, base_dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = base_dir.join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Reject settings that would only fail once requests arrive
    pub fn validate(&self) -> Result<()> {
        if self.index_names.is_empty() {
            bail!("index_names must not be empty");
        }

        for name in &self.index_names {
            let mut components = Path::new(name).components();
            match (components.next(), components.next()) {
                (Some(Component::Normal(_)), None) => {}
                _ => bail!("index name {:?} must be a plain file name", name),
            }
        }

        if !ThemeSet::load_defaults()
            .themes
            .contains_key(&self.highlight_theme)
        {
            bail!("unknown highlight theme {:?}", self.highlight_theme);
        }

        Ok(())
    }
}
