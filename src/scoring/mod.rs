//! Query-to-document selection via cross-encoder scoring.
//!
//! For one [`QueryRequest`], every candidate document is chunked, all chunks are scored
//! against the query in a single batch, and the document owning the best chunk wins.
//!
//! # Pooling order
//!
//! Candidates are pooled in ascending id order, each contributing its chunks in document
//! order. That order is what the tie-break refers to: when two chunks share the maximal score,
//! the one pooled first decides the result. Evaluation treats retrieval as single-answer, so
//! this rule must stay stable.

pub mod error;
pub mod selector;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::ScoringError;
pub use selector::{CrossEncoderSelector, first_max};
pub use types::{QueryRequest, ScoredChunk, SelectionOutcome};
