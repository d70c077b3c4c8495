//! Corpus and data-file error types.

use std::path::PathBuf;
use thiserror::Error;

/// Returned when a category name is not one of the known corpora.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category '{value}': expected one of insurance, finance, faq")]
pub struct UnknownCategory {
    /// The rejected input.
    pub value: String,
}

/// Errors raised while reading or writing the JSON data files (corpus caches,
/// question sets, answer sheets).
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The extracted-text cache for a category has not been produced yet.
    #[error("corpus cache not found: {path}")]
    CacheMissing { path: PathBuf },

    /// Filesystem failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not the expected JSON shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A corpus key that is not an unsigned integer document id.
    #[error("invalid document id '{key}' in {path}")]
    InvalidDocumentId { path: PathBuf, key: String },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CorpusError::Parse {
            path: path.into(),
            source,
        }
    }
}
