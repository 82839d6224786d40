//! Request path normalization and Markdown classification

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// Suffixes that make a request path a render candidate
pub const MARKDOWN_SUFFIXES: &[&str] = &[".md", ".markdown"];

/// Outcome of looking at a request path alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Ends with a Markdown suffix
    Markdown,
    /// Anything else; may still be a directory with an index document
    Unclassified,
}

/// Classify a request path by its suffix.
///
/// Matching is exact and case-sensitive: `notes.md` is Markdown while
/// `notes.mdx` and `notes.MD` are not.
pub fn classify(path: &str) -> PathClass {
    if MARKDOWN_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        PathClass::Markdown
    } else {
        PathClass::Unclassified
    }
}

/// A request path reduced to plain segments below the content root.
///
/// `.` segments are dropped and `..` removes the previous segment, stopping
/// at the root, so a `CleanPath` joined onto the root can never leave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPath {
    segments: Vec<String>,
    directory: bool,
}

impl CleanPath {
    /// Normalize a raw URL path.
    ///
    /// Returns `None` when a decoded segment is not a single normal path
    /// component on this platform (a drive prefix, an embedded separator) or
    /// holds a NUL byte, which no filesystem accepts.
    pub fn parse(raw: &str) -> Option<Self> {
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        let mut segments: Vec<String> = Vec::new();
        let mut last = "";

        for segment in decoded.split('/') {
            last = segment;
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name if name.contains('\0') => return None,
                name => {
                    let mut components = Path::new(name).components();
                    match (components.next(), components.next()) {
                        (Some(Component::Normal(_)), None) => segments.push(name.to_string()),
                        _ => return None,
                    }
                }
            }
        }

        let directory = segments.is_empty() || matches!(last, "" | "." | "..");
        Some(Self {
            segments,
            directory,
        })
    }

    /// Whether the request names a directory (trailing slash or the root)
    pub fn is_directory_shaped(&self) -> bool {
        self.directory
    }

    /// The same location with `name` appended as a file
    pub fn join_file(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self {
            segments,
            directory: false,
        }
    }

    /// Path relative to the content root
    pub fn relative(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// Canonical URL form, always starting with `/`
    pub fn as_url(&self) -> String {
        let mut url = String::from("/");
        url.push_str(&self.segments.join("/"));
        if self.directory && !self.segments.is_empty() {
            url.push('/');
        }
        url
    }
}
