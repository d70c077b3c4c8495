//! Relevance model runtime.
//!
//! - [`reranker`] provides the candle cross-encoder used by [`crate::scoring`].
//! - [`relevance`] defines the [`RelevanceModel`] seam the scorer depends on.

/// Sequence-pair classifier (BERT / XLM-R encoder + relevance head).
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod relevance;
/// Cross-encoder reranker.
pub mod reranker;
/// Tokenizer loading helpers.
pub mod utils;

pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{RecordedCall, ScriptedRelevanceModel};
pub use relevance::RelevanceModel;
pub use reranker::{MAX_SEQ_LEN, Reranker, RerankerConfig, RerankerError};
