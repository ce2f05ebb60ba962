//! # Document Errors
//!
//! Error taxonomy shared by models, contexts and factories.

use thiserror::Error;

/// Errors surfaced by the document core
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Structured content could not be parsed as JSON
    #[error("failed to parse document content: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend I/O failure
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The requested resource does not exist in the backend
    #[error("no such file: '{0}'")]
    NotFound(String),

    /// Path would resolve outside the backend's root
    #[error("invalid path: '{0}'")]
    InvalidPath(String),

    /// Attempted to persist a read-only document
    #[error("document '{0}' is read-only")]
    ReadOnly(String),

    /// Operation on a context that has already been disposed
    #[error("context for '{0}' has been disposed")]
    Disposed(String),

    /// Widget factory options are unusable
    #[error("invalid widget factory: {0}")]
    InvalidFactory(String),

    /// Settings file could not be read
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result alias used throughout the document core
pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_should_convert_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let doc_err: DocumentError = err.into();

        assert!(matches!(doc_err, DocumentError::Parse(_)));
        assert!(doc_err.to_string().starts_with("failed to parse"));
    }

    #[test]
    fn not_found_should_name_the_path() {
        let err = DocumentError::NotFound("notes/a.txt".to_string());
        assert_eq!(err.to_string(), "no such file: 'notes/a.txt'");
    }
}
