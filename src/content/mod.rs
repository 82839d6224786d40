//! Content module - resolves request paths and renders Markdown documents

mod dispatch;
mod index;
mod loader;
mod markdown;
mod path;
mod root;

pub use dispatch::{resolve, ResolvedTarget, TargetKind};
pub use index::{IndexResolver, DEFAULT_INDEX_NAMES};
pub use loader::ContentLoader;
pub use markdown::{MarkdownRenderer, DEFAULT_THEME};
pub use path::{classify, CleanPath, PathClass, MARKDOWN_SUFFIXES};
pub use root::{code_root, ContentRoot, CODE_ROOT_ENV};
