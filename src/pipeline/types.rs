use serde::{Deserialize, Serialize};

use super::error::PipelineError;
use crate::scoring::QueryRequest;

/// A question as read from the questions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub qid: u64,
    /// Candidate document ids.
    pub source: Vec<u64>,
    pub query: String,
    /// Category name; checked against the known set when the batch is prepared.
    pub category: String,
}

/// Top-level shape of the questions file: `{"questions": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<Question>,
}

/// One answer. `retrieve` is `null` when the candidate pool was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalResult {
    pub qid: u64,
    #[serde(rename = "retrieve")]
    pub document_id: Option<u64>,
}

/// Top-level shape of the answers file: `{"answers": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSheet {
    pub answers: Vec<RetrievalResult>,
}

impl TryFrom<&Question> for QueryRequest {
    type Error = PipelineError;

    fn try_from(question: &Question) -> Result<Self, Self::Error> {
        let category =
            question
                .category
                .parse()
                .map_err(|source| PipelineError::UnknownCategory {
                    qid: question.qid,
                    source,
                })?;

        Ok(QueryRequest::new(
            question.qid,
            question.query.clone(),
            category,
            question.source.iter().copied(),
        ))
    }
}
