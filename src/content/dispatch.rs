//! Request dispatch: decide how a cleaned request path is served

use std::path::{Path, PathBuf};

use super::index::IndexResolver;
use super::path::{classify, CleanPath, PathClass};
use super::root::ContentRoot;
use crate::error::{is_not_found, ContentError};

/// How a resolved request is served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Render the file as Markdown inside the page template
    Markdown,
    /// Hand the request to the static file server
    Static,
    /// A render candidate whose file does not exist
    NotFound,
}

/// Where a request ended up after classification and index probing.
///
/// Only [`resolve`] builds one, and it always composes the path from the
/// content root and a [`CleanPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    path: PathBuf,
    url: String,
    kind: TargetKind,
}

impl ResolvedTarget {
    /// Absolute filesystem path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Effective request path, after any index rewrite
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }
}

/// Resolve a request path against the content root.
///
/// Markdown-suffixed paths are render candidates. Other paths that name a
/// directory are probed for an index document and, when one exists, resolved
/// as if the index had been requested directly. Everything else is static.
pub async fn resolve(
    root: &ContentRoot,
    index: &IndexResolver,
    request: &CleanPath,
) -> Result<ResolvedTarget, ContentError> {
    let url = request.as_url();
    let path = root.join(request);

    if classify(&url) == PathClass::Markdown {
        return markdown_target(path, url).await;
    }

    if request.is_directory_shaped() || is_directory(&path, &url).await? {
        if let Some(name) = index.probe(&path, &url).await? {
            let index_path = request.join_file(name);
            return markdown_target(root.join(&index_path), index_path.as_url()).await;
        }
    }

    Ok(ResolvedTarget {
        path,
        url,
        kind: TargetKind::Static,
    })
}

async fn markdown_target(path: PathBuf, url: String) -> Result<ResolvedTarget, ContentError> {
    let kind = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => TargetKind::Markdown,
        Ok(_) => TargetKind::NotFound,
        Err(e) if is_not_found(&e) => TargetKind::NotFound,
        Err(e) => return Err(ContentError::from_io(&url, e)),
    };
    Ok(ResolvedTarget { path, url, kind })
}

async fn is_directory(path: &Path, url: &str) -> Result<bool, ContentError> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Ok(meta.is_dir()),
        Err(e) if is_not_found(&e) => Ok(false),
        Err(e) => Err(ContentError::from_io(url, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ContentRoot) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("README.md"), "# Home").unwrap();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/README.md"), "Hi").unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::write(dir.path().join("static/app.js"), "let x = 1;").unwrap();
        let root = ContentRoot::resolve(dir.path().to_str().unwrap()).unwrap();
        (dir, root)
    }

    async fn resolve_str(root: &ContentRoot, raw: &str) -> ResolvedTarget {
        let request = CleanPath::parse(raw).unwrap();
        resolve(root, &IndexResolver::default(), &request)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_markdown_file() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/README.md").await;
        assert_eq!(target.kind(), TargetKind::Markdown);
        assert_eq!(target.url(), "/README.md");
        assert_eq!(target.path(), root.path().join("README.md"));
    }

    #[tokio::test]
    async fn test_missing_markdown_is_not_found() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/missing.md").await;
        assert_eq!(target.kind(), TargetKind::NotFound);
        assert_eq!(target.url(), "/missing.md");
    }

    #[tokio::test]
    async fn test_markdown_named_directory_is_not_found() {
        let (dir, root) = setup();
        fs::create_dir(dir.path().join("odd.md")).unwrap();
        let target = resolve_str(&root, "/odd.md").await;
        assert_eq!(target.kind(), TargetKind::NotFound);
    }

    #[tokio::test]
    async fn test_directory_with_trailing_slash_uses_index() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/docs/").await;
        assert_eq!(target.kind(), TargetKind::Markdown);
        assert_eq!(target.url(), "/docs/README.md");
        assert_eq!(target.path(), root.path().join("docs").join("README.md"));
    }

    #[tokio::test]
    async fn test_directory_without_trailing_slash_uses_index() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/docs").await;
        assert_eq!(target.kind(), TargetKind::Markdown);
        assert_eq!(target.url(), "/docs/README.md");
    }

    #[tokio::test]
    async fn test_root_uses_index() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/").await;
        assert_eq!(target.url(), "/README.md");
        assert_eq!(target.kind(), TargetKind::Markdown);
    }

    #[tokio::test]
    async fn test_directory_without_index_is_static() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/static/").await;
        assert_eq!(target.kind(), TargetKind::Static);
        assert_eq!(target.url(), "/static/");
    }

    #[tokio::test]
    async fn test_plain_file_is_static() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/static/app.js").await;
        assert_eq!(target.kind(), TargetKind::Static);

        let target = resolve_str(&root, "/nothing/here.txt").await;
        assert_eq!(target.kind(), TargetKind::Static);
    }

    #[tokio::test]
    async fn test_traversal_resolves_inside_root() {
        let (_dir, root) = setup();
        let target = resolve_str(&root, "/docs/../../../README.md").await;
        assert_eq!(target.path(), root.path().join("README.md"));
        assert!(root.contains(target.path()));
    }
}
