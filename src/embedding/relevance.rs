use super::reranker::RerankerError;

/// A sequence-pair relevance model.
///
/// `score_pairs` returns exactly one score per input pair, in input order. Implementations are
/// expected to be deterministic for identical inputs and to keep no state between calls.
pub trait RelevanceModel {
    fn score_pairs(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError>;
}

impl<M: RelevanceModel + ?Sized> RelevanceModel for &M {
    fn score_pairs(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        (**self).score_pairs(pairs)
    }
}
