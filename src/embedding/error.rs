use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("tokenizer not found at path: {path}")]
    TokenizerNotFound { path: PathBuf },

    #[error("failed to load tokenizer: {reason}")]
    TokenizerLoadFailed { reason: String },

    #[error("invalid tokenizer configuration: {reason}")]
    InvalidConfig { reason: String },
}
