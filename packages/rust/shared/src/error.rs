//! Error types for schemadoc.
//!
//! Library crates use [`SchemaDocError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all schemadoc operations.
///
/// Every variant is fatal to a generation run: the catalog is all-or-nothing.
#[derive(Debug, thiserror::Error)]
pub enum SchemaDocError {
    /// Filesystem I/O error (schema directory, schema file, or output file).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A schema file lacks a parsable embedded metadata block.
    #[error("malformed metadata header in {file}: {reason}")]
    MalformedHeader { file: String, reason: String },

    /// The line scan found no `title:` line.
    #[error("no title line found in {file}")]
    TitleNotFound { file: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SchemaDocError>;

impl SchemaDocError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a malformed-header error for `file`.
    pub fn malformed(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedHeader {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn title_not_found(file: impl Into<String>) -> Self {
        Self::TitleNotFound { file: file.into() }
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
        let err = SchemaDocError::config("unknown variant `loud`");
        assert_eq!(err.to_string(), "config error: unknown variant `loud`");

        let err = SchemaDocError::title_not_found("ping-api.d.ts");
        assert_eq!(err.to_string(), "no title line found in ping-api.d.ts");

        let err = SchemaDocError::malformed("service.d.ts", "no block comment");
        assert!(err.to_string().contains("service.d.ts"));
        assert!(err.to_string().contains("no block comment"));
    }

    #[test]
    fn io_error_names_path() {
        let err = SchemaDocError::io(
            "/nope/schemas",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("/nope/schemas"));
    }
}
