//! Index document lookup for directory requests

use std::path::Path;

use crate::error::{is_not_found, ContentError};

/// Index document names probed when none are configured
pub const DEFAULT_INDEX_NAMES: &[&str] = &["README.md", "README.markdown"];

/// Finds the implicit document for a directory-shaped request
#[derive(Debug, Clone)]
pub struct IndexResolver {
    names: Vec<String>,
}

impl IndexResolver {
    /// Create a resolver probing `names` in order
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Return the first index name that exists as a regular file under `dir`.
    ///
    /// A missing candidate, or `dir` not being a directory at all, moves on to
    /// the next name. Any other stat failure is reported as a read error for
    /// `url` rather than guessed either way.
    pub async fn probe(&self, dir: &Path, url: &str) -> Result<Option<&str>, ContentError> {
        for name in &self.names {
            let candidate = dir.join(name);
            match tokio::fs::metadata(&candidate).await {
                Ok(meta) if meta.is_file() => {
                    tracing::debug!("Index {} found for {}", name, url);
                    return Ok(Some(name.as_str()));
                }
                Ok(_) => continue,
                Err(e) if is_not_found(&e) => continue,
                Err(e) => return Err(ContentError::from_io(url, e)),
            }
        }
        Ok(None)
    }
}

impl Default for IndexResolver {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_probe_prefers_first_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "a").unwrap();
        fs::write(dir.path().join("README.markdown"), "b").unwrap();

        let resolver = IndexResolver::default();
        let found = resolver.probe(dir.path(), "/").await.unwrap();
        assert_eq!(found, Some("README.md"));
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_second_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.markdown"), "b").unwrap();

        let resolver = IndexResolver::default();
        let found = resolver.probe(dir.path(), "/").await.unwrap();
        assert_eq!(found, Some("README.markdown"));
    }

    #[tokio::test]
    async fn test_probe_without_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.md"), "x").unwrap();

        let resolver = IndexResolver::default();
        assert_eq!(resolver.probe(dir.path(), "/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_skips_directory_named_like_index() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("README.md")).unwrap();

        let resolver = IndexResolver::default();
        assert_eq!(resolver.probe(dir.path(), "/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_under_file_is_absent() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let resolver = IndexResolver::default();
        assert_eq!(resolver.probe(&file, "/plain.txt/").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_probe_custom_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.md"), "x").unwrap();

        let resolver = IndexResolver::new(vec!["index.md".to_string()]);
        let found = resolver.probe(dir.path(), "/").await.unwrap();
        assert_eq!(found, Some("index.md"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_reports_other_stat_errors() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("README.md", dir.path().join("README.md")).unwrap();
        fs::write(dir.path().join("README.markdown"), "b").unwrap();

        let resolver = IndexResolver::default();
        let err = resolver.probe(dir.path(), "/loop/").await.unwrap_err();
        assert!(matches!(err, ContentError::Read { ref path, .. } if path == "/loop/"));
    }
}
