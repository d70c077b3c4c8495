use tracing::{debug, info};

use crate::corpus::Corpus;
use crate::embedding::{RelevanceModel, Reranker, RerankerConfig};
use crate::structure::{Chunk, DocumentStructurer};

use super::error::ScoringError;
use super::types::{QueryRequest, ScoredChunk, SelectionOutcome};

/// Picks the candidate document that holds the single most relevant chunk.
#[derive(Debug)]
pub struct CrossEncoderSelector<M = Reranker> {
    model: M,
    structurer: DocumentStructurer,
}

impl CrossEncoderSelector<Reranker> {
    pub fn load(config: RerankerConfig) -> Result<Self, ScoringError> {
        Self::new(Reranker::load(config)?)
    }

    pub fn stub() -> Result<Self, ScoringError> {
        Self::new(Reranker::stub()?)
    }
}

impl<M: RelevanceModel> CrossEncoderSelector<M> {
    pub fn new(model: M) -> Result<Self, ScoringError> {
        Ok(Self::with_structurer(model, DocumentStructurer::new()?))
    }

    pub fn with_structurer(model: M, structurer: DocumentStructurer) -> Self {
        Self { model, structurer }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn structurer(&self) -> &DocumentStructurer {
        &self.structurer
    }

    /// Chunks every candidate document, ascending by id, into one flat pool.
    ///
    /// Chunks keep document order within each candidate. Fails on the first candidate id that
    /// is not in the corpus; nothing is skipped silently.
    pub fn build_pool(
        &self,
        request: &QueryRequest,
        corpus: &Corpus,
        chunk_size: usize,
    ) -> Result<Vec<Chunk>, ScoringError> {
        let category_corpus =
            corpus
                .category(request.category)
                .ok_or(ScoringError::CategoryNotLoaded {
                    category: request.category,
                })?;

        let mut pool = Vec::new();
        for &document_id in &request.candidate_ids {
            let document =
                category_corpus
                    .get(document_id)
                    .ok_or(ScoringError::DocumentNotFound {
                        category: request.category,
                        document_id,
                    })?;
            pool.extend(self.structurer.chunk_document(document, chunk_size)?);
        }

        debug!(
            qid = request.qid,
            candidates = request.candidate_ids.len(),
            pool_size = pool.len(),
            "Built candidate chunk pool"
        );

        Ok(pool)
    }

    /// Scores the whole pool in one batch and returns it in pooling order.
    pub fn rank_chunks(
        &self,
        request: &QueryRequest,
        corpus: &Corpus,
        chunk_size: usize,
    ) -> Result<Vec<ScoredChunk>, ScoringError> {
        let pool = self.build_pool(request, corpus, chunk_size)?;
        let scores = self.score_pool(&request.query, &pool)?;

        Ok(pool
            .into_iter()
            .zip(scores)
            .map(|(chunk, score)| ScoredChunk::new(chunk, score))
            .collect())
    }

    /// Returns the document owning the highest-scoring chunk.
    ///
    /// Ties go to the first maximum in pooling order (lower candidate id, then earlier chunk).
    /// An empty pool yields [`SelectionOutcome::NoCandidates`] without calling the model.
    pub fn score_and_select(
        &self,
        request: &QueryRequest,
        corpus: &Corpus,
        chunk_size: usize,
    ) -> Result<SelectionOutcome, ScoringError> {
        let pool = self.build_pool(request, corpus, chunk_size)?;
        if pool.is_empty() {
            debug!(qid = request.qid, "No chunks to score");
            return Ok(SelectionOutcome::NoCandidates);
        }

        let scores = self.score_pool(&request.query, &pool)?;

        let (pool_index, score) =
            first_max(&scores).ok_or_else(|| ScoringError::ComputationFailed {
                reason: "no comparable score in batch".to_string(),
            })?;
        let document_id = pool[pool_index].document_id;

        info!(
            qid = request.qid,
            category = %request.category,
            document_id,
            score,
            pool_size = pool.len(),
            "Selected document"
        );

        Ok(SelectionOutcome::Selected {
            document_id,
            score,
            pool_index,
        })
    }

    fn score_pool(&self, query: &str, pool: &[Chunk]) -> Result<Vec<f32>, ScoringError> {
        if pool.is_empty() {
            return Ok(Vec::new());
        }

        let pairs: Vec<(&str, &str)> = pool
            .iter()
            .map(|chunk| (query, chunk.content.as_str()))
            .collect();
        let scores = self.model.score_pairs(&pairs)?;

        if scores.len() != pairs.len() {
            return Err(ScoringError::ComputationFailed {
                reason: format!(
                    "expected {} scores, model returned {}",
                    pairs.len(),
                    scores.len()
                ),
            });
        }

        Ok(scores)
    }
}

/// Index and value of the first maximum. Only a strictly greater score replaces the current
/// best, and NaN never wins. `None` when no score is comparable.
pub fn first_max(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}
