//! Request-level errors and their HTTP mapping

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::io;
use thiserror::Error;

/// Failure while serving a single render request.
///
/// Every variant carries the request path as the client sent it (after
/// normalization), never the absolute filesystem path.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The render target does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The target exists but could not be read or probed
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The page template failed to execute
    #[error("could not render {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: tera::Error,
    },
}

impl ContentError {
    /// Classify an I/O error raised while touching `path`.
    ///
    /// Only a missing file (or a missing directory along the way) counts as
    /// not found; everything else is a read failure.
    pub fn from_io(path: &str, err: io::Error) -> Self {
        if is_not_found(&err) {
            Self::NotFound(path.to_string())
        } else {
            Self::Read {
                path: path.to_string(),
                source: err,
            }
        }
    }

    /// HTTP status reported to the client
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Read { .. } | Self::Render { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Plain-text body sent to the client
    fn client_message(&self) -> String {
        let reason = self.status().canonical_reason().unwrap_or("Error");
        match self {
            Self::NotFound(path) => format!("{}: {}", reason, path),
            Self::Read { path, .. } => format!("{}: could not read {}", reason, path),
            Self::Render { path, .. } => format!("{}: could not render {}", reason, path),
        }
    }
}

/// Whether an I/O error means the probed path is absent
pub(crate) fn is_not_found(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}

impl IntoResponse for ContentError {
    fn into_response(self) -> Response {
        match &self {
            Self::NotFound(_) => tracing::warn!("{}", self),
            Self::Read { source, .. } => tracing::error!("{} ({:?})", self, source.kind()),
            Self::Render { source, .. } => {
                tracing::error!("{}: {:?}", self, std::error::Error::source(source))
            }
        }

        let mut response = (self.status(), self.client_message()).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ContentError::from_io("/a.md", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ContentError::NotFound(ref p) if p == "/a.md"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_permission_denied_is_read_error() {
        let err = ContentError::from_io(
            "/a.md",
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ContentError::Read { .. }));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_client_message_names_path() {
        let err = ContentError::NotFound("/missing.md".to_string());
        assert_eq!(err.client_message(), "Not Found: /missing.md");

        let err = ContentError::from_io("/x.md", io::Error::other("disk on fire"));
        let message = err.client_message();
        assert_eq!(message, "Internal Server Error: could not read /x.md");
        assert!(!message.contains("disk on fire"));
    }

    #[test]
    fn test_into_response_is_plain_text() {
        let response = ContentError::NotFound("/x.md".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
