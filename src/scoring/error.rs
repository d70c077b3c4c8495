use thiserror::Error;

use crate::corpus::Category;
use crate::embedding::RerankerError;
use crate::structure::StructureError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("reranker error: {0}")]
    Reranker(#[from] RerankerError),

    #[error("structuring error: {0}")]
    Structure(#[from] StructureError),

    /// The request's category has no corpus loaded. Configuration mismatch, not a data issue.
    #[error("no corpus loaded for category '{category}'")]
    CategoryNotLoaded { category: Category },

    /// A candidate id does not resolve in its category corpus.
    #[error("document {document_id} not found in {category} corpus")]
    DocumentNotFound { category: Category, document_id: u64 },

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
