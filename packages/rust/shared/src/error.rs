//! Error types for docindex.
//!
//! Library crates use [`DocIndexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all docindex operations.
#[derive(Debug, thiserror::Error)]
pub enum DocIndexError {
    /// Manifest validation error (not an object, missing/invalid `docs`).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Network failure or non-success HTTP status while fetching a resource.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Fetch succeeded but the document content is empty or unusable.
    #[error("load error: {0}")]
    Load(String),

    /// Configuration or optional-collaborator error (non-fatal at call sites).
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocIndexError>;

impl DocIndexError {
    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DocIndexError::validation("no 'docs' section in doc index");
        assert_eq!(
            err.to_string(),
            "validation error: no 'docs' section in doc index"
        );

        let err = DocIndexError::Fetch("doc.md: HTTP 404 Not Found".into());
        assert!(err.to_string().contains("HTTP 404"));

        let err = DocIndexError::Load("doc.md: empty document".into());
        assert!(err.to_string().starts_with("load error"));
    }
}
