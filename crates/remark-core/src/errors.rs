//! Typed error types for remark-core.
//!
//! Store mutations never fail: a missing target is a no-op. Errors only
//! arise at the edges, when building comments from caller input or when
//! decoding snapshots and command journals.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in remark-core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A comment was built from unusable input (empty id, blank content).
    #[error("Invalid comment {id:?}: {reason}")]
    InvalidComment { id: String, reason: String },

    /// A snapshot document could not be decoded.
    #[error("Malformed snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    /// A command journal line could not be decoded.
    #[error("Malformed journal entry at line {line}: {source}")]
    Journal {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_comment_message() {
        let err = CoreError::InvalidComment {
            id: "c1".to_string(),
            reason: "content is empty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid comment \"c1\": content is empty");
    }

    #[test]
    fn test_journal_error_reports_line() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = CoreError::Journal { line: 7, source };
        assert!(err.to_string().starts_with("Malformed journal entry at line 7"));
    }
}
