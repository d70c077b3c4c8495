use thiserror::Error;

use crate::corpus::{CorpusError, UnknownCategory};
use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A question names a category outside the known set. Raised before any scoring.
    #[error("question {qid}: {source}")]
    UnknownCategory {
        qid: u64,
        #[source]
        source: UnknownCategory,
    },

    #[error("chunk size must be greater than zero, got {chunk_size}")]
    InvalidChunkSize { chunk_size: usize },

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),
}
