//! Content loader - reads render targets from the content root

use super::dispatch::ResolvedTarget;
use super::root::ContentRoot;
use crate::error::ContentError;

/// Reads files for resolved targets, never outside the content root
pub struct ContentLoader<'a> {
    root: &'a ContentRoot,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(root: &'a ContentRoot) -> Self {
        Self { root }
    }

    /// Read the full contents of a target.
    ///
    /// A target that does not lie under this loader's root is reported as not
    /// found without touching the filesystem.
    pub async fn load(&self, target: &ResolvedTarget) -> Result<Vec<u8>, ContentError> {
        if !self.root.contains(target.path()) {
            tracing::warn!("Refusing to read {} outside content root", target.url());
            return Err(ContentError::NotFound(target.url().to_string()));
        }

        let bytes = tokio::fs::read(target.path())
            .await
            .map_err(|e| ContentError::from_io(target.url(), e))?;
        tracing::debug!("Loaded {} ({} bytes)", target.url(), bytes.len());
        Ok(bytes)
    }
}
