//! Docsift library crate (used by the batch binary and integration tests).
//!
//! # Public API Surface
//!
//! ## Documents
//! - [`Category`], [`Corpus`], [`RawDocument`] - Per-category document stores
//! - [`load_corpus`], [`CorpusPaths`] - JSON cache loading
//!
//! ## Structuring
//! - [`DocumentStructurer`], [`Chunk`] - Header-aware and fixed-size chunking
//! - [`DateNormalizer`] - Finance date normalization
//!
//! ## Scoring
//! - [`Reranker`], [`RerankerConfig`] - Cross-encoder runtime
//! - [`RelevanceModel`] - Scoring seam used by [`CrossEncoderSelector`]
//! - [`CrossEncoderSelector`], [`SelectionOutcome`] - Best-chunk document selection
//!
//! ## Batch
//! - [`RetrievalPipeline`], [`Question`], [`RetrievalResult`] - Question batches
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod corpus;
pub mod embedding;
pub mod pipeline;
pub mod scoring;
pub mod structure;

pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SEQ_LEN};
pub use corpus::{
    Category, CategoryCorpus, Corpus, CorpusError, CorpusPaths, RawDocument, UnknownCategory,
    load_corpus,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{RecordedCall, ScriptedRelevanceModel};
pub use embedding::{EmbeddingError, RelevanceModel, Reranker, RerankerConfig, RerankerError};
pub use pipeline::{
    AnswerSheet, PipelineError, Question, QuestionSet, RetrievalPipeline, RetrievalResult,
    load_questions, write_answers,
};
pub use scoring::{
    CrossEncoderSelector, QueryRequest, ScoredChunk, ScoringError, SelectionOutcome, first_max,
};
pub use structure::{
    Chunk, ChunkStrategy, DateNormalizer, DocumentStructurer, HeaderLevel, HeaderPromoter,
    StructureError, structure_flat,
};
