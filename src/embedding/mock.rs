//! Scripted relevance model for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use super::relevance::RelevanceModel;
use super::reranker::RerankerError;

/// One recorded `score_pairs` call.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub pairs: Vec<(String, String)>,
}

/// Returns a fixed score per passage text (or a default) and records every call.
#[derive(Debug, Default)]
pub struct ScriptedRelevanceModel {
    scores: HashMap<String, f32>,
    default_score: f32,
    calls: Mutex<Vec<RecordedCall>>,
    fail_with: Option<String>,
}

impl ScriptedRelevanceModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores any pair whose passage equals `passage` with `score`.
    pub fn with_passage_score(mut self, passage: impl Into<String>, score: f32) -> Self {
        self.scores.insert(passage.into(), score);
        self
    }

    pub fn with_default_score(mut self, score: f32) -> Self {
        self.default_score = score;
        self
    }

    /// Makes every call fail with an inference error.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.fail_with = Some(reason.into());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

impl RelevanceModel for ScriptedRelevanceModel {
    fn score_pairs(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        self.calls
            .lock()
            .map_err(|e| RerankerError::InferenceFailed {
                reason: format!("Lock poisoned: {}", e),
            })?
            .push(RecordedCall {
                pairs: pairs
                    .iter()
                    .map(|(q, p)| (q.to_string(), p.to_string()))
                    .collect(),
            });

        if let Some(reason) = &self.fail_with {
            return Err(RerankerError::InferenceFailed {
                reason: reason.clone(),
            });
        }

        Ok(pairs
            .iter()
            .map(|(_, passage)| {
                self.scores
                    .get(*passage)
                    .copied()
                    .unwrap_or(self.default_score)
            })
            .collect())
    }
}
