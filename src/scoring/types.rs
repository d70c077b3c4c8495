use std::collections::BTreeSet;

use crate::corpus::Category;
use crate::structure::Chunk;

/// One question to answer: a query scoped to a category and a candidate id set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub qid: u64,
    pub query: String,
    pub category: Category,
    /// Iterated in ascending order, which fixes the pooling order.
    pub candidate_ids: BTreeSet<u64>,
}

impl QueryRequest {
    pub fn new(
        qid: u64,
        query: impl Into<String>,
        category: Category,
        candidate_ids: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            qid,
            query: query.into(),
            category,
            candidate_ids: candidate_ids.into_iter().collect(),
        }
    }
}

/// A pooled chunk with its relevance score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub relevance_score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, relevance_score: f32) -> Self {
        Self {
            chunk,
            relevance_score,
        }
    }

    pub fn document_id(&self) -> u64 {
        self.chunk.document_id
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Outcome of scoring one query against its candidate pool.
pub enum SelectionOutcome {
    /// The document owning the first maximal chunk.
    Selected {
        document_id: u64,
        /// Relevance score of the winning chunk.
        score: f32,
        /// Position of the winning chunk in the pool.
        pool_index: usize,
    },
    /// The candidate pool held no chunks; nothing was scored.
    NoCandidates,
}

impl SelectionOutcome {
    pub fn document_id(&self) -> Option<u64> {
        match self {
            SelectionOutcome::Selected { document_id, .. } => Some(*document_id),
            SelectionOutcome::NoCandidates => None,
        }
    }

    pub fn score(&self) -> Option<f32> {
        match self {
            SelectionOutcome::Selected { score, .. } => Some(*score),
            SelectionOutcome::NoCandidates => None,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, SelectionOutcome::Selected { .. })
    }

    /// Returns a short debug string.
    pub fn debug_status(&self) -> &'static str {
        match self {
            SelectionOutcome::Selected { .. } => "SELECTED",
            SelectionOutcome::NoCandidates => "NO_CANDIDATES",
        }
    }
}

impl std::fmt::Display for SelectionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionOutcome::Selected {
                document_id, score, ..
            } => write!(f, "SELECTED {} (score: {:.4})", document_id, score),
            SelectionOutcome::NoCandidates => write!(f, "NO_CANDIDATES"),
        }
    }
}
