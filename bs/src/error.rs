//! BoardStore error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during board operations
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt board snapshot: {0}")]
    CorruptSnapshot(#[source] serde_json::Error),

    #[error("Failed to serialize board snapshot: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Card title must not be empty")]
    EmptyTitle,
}

impl BoardError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the stored payload could not be parsed
    pub fn is_corrupt(&self) -> bool {
        matches!(self, BoardError::CorruptSnapshot(_))
    }
}

/// Result alias for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_corrupt() {
        let parse_err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        assert!(BoardError::CorruptSnapshot(parse_err).is_corrupt());
        assert!(!BoardError::EmptyTitle.is_corrupt());
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = BoardError::io("/tmp/board.json", std::io::Error::other("disk full"));
        let msg = err.to_string();
        assert!(msg.contains("/tmp/board.json"));
        assert!(msg.contains("disk full"));
    }
}
