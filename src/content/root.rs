//! Content root resolution

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

use super::path::CleanPath;

/// Environment variable overriding the code root
pub const CODE_ROOT_ENV: &str = "MARKDIR_CODE_ROOT";

/// Absolute directory that bounds every read the server makes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRoot(PathBuf);

impl ContentRoot {
    /// Resolve a configured root into an absolute, existing directory.
    ///
    /// A leading `~` is expanded to the home directory and relative paths are
    /// taken from the working directory.
    pub fn resolve(configured: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(configured);
        let path = Path::new(expanded.as_ref());

        let canonical = path
            .canonicalize()
            .with_context(|| format!("content root {:?} does not exist", configured))?;
        if !canonical.is_dir() {
            bail!("content root {:?} is not a directory", canonical);
        }

        Ok(Self(canonical))
    }

    /// The root directory itself
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Absolute location of a cleaned request path
    pub fn join(&self, path: &CleanPath) -> PathBuf {
        self.0.join(path.relative())
    }

    /// Whether `path` lies at or below the root
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.0)
    }
}

/// Directory that relative template paths resolve against.
///
/// `MARKDIR_CODE_ROOT` wins when set and non-empty, otherwise the working
/// directory is used.
pub fn code_root() -> Result<PathBuf> {
    code_root_from(std::env::var(CODE_ROOT_ENV).ok())
}

fn code_root_from(value: Option<String>) -> Result<PathBuf> {
    match value {
        Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => std::env::current_dir().context("could not determine working directory"),
    }
}
