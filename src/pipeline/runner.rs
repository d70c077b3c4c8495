use std::time::Instant;

use tracing::{debug, info};

use super::error::PipelineError;
use super::types::{Question, RetrievalResult};
use crate::corpus::Corpus;
use crate::embedding::{RelevanceModel, Reranker};
use crate::scoring::{CrossEncoderSelector, QueryRequest, ScoringError};

/// Answers a batch of questions one at a time, in input order.
#[derive(Debug)]
pub struct RetrievalPipeline<M = Reranker> {
    selector: CrossEncoderSelector<M>,
    chunk_size: usize,
}

impl<M: RelevanceModel> RetrievalPipeline<M> {
    pub fn new(selector: CrossEncoderSelector<M>, chunk_size: usize) -> Result<Self, PipelineError> {
        if chunk_size == 0 {
            return Err(PipelineError::InvalidChunkSize { chunk_size });
        }
        Ok(Self {
            selector,
            chunk_size,
        })
    }

    pub fn selector(&self) -> &CrossEncoderSelector<M> {
        &self.selector
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Converts every question and checks its category is loaded.
    ///
    /// Fails on the first bad question; nothing has been scored at that point.
    pub fn prepare(
        &self,
        questions: &[Question],
        corpus: &Corpus,
    ) -> Result<Vec<QueryRequest>, PipelineError> {
        questions
            .iter()
            .map(|question| -> Result<QueryRequest, PipelineError> {
                let request = QueryRequest::try_from(question)?;
                if !corpus.contains_category(request.category) {
                    return Err(ScoringError::CategoryNotLoaded {
                        category: request.category,
                    }
                    .into());
                }
                Ok(request)
            })
            .collect()
    }

    /// Validates the whole batch, then answers each question.
    pub fn run(
        &self,
        questions: &[Question],
        corpus: &Corpus,
    ) -> Result<Vec<RetrievalResult>, PipelineError> {
        let requests = self.prepare(questions, corpus)?;
        self.run_requests(&requests, corpus)
    }

    pub fn run_requests(
        &self,
        requests: &[QueryRequest],
        corpus: &Corpus,
    ) -> Result<Vec<RetrievalResult>, PipelineError> {
        let start = Instant::now();
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            let outcome = self
                .selector
                .score_and_select(request, corpus, self.chunk_size)?;
            debug!(qid = request.qid, outcome = %outcome, "Question answered");

            results.push(RetrievalResult {
                qid: request.qid,
                document_id: outcome.document_id(),
            });
        }

        info!(
            questions = results.len(),
            unanswered = results.iter().filter(|r| r.document_id.is_none()).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Retrieval batch complete"
        );

        Ok(results)
    }
}
