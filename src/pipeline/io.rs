use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::{debug, info};

use super::types::{AnswerSheet, Question, QuestionSet, RetrievalResult};
use crate::corpus::CorpusError;

/// Reads `{"questions": [...]}` and returns the questions in file order.
pub fn load_questions(path: &Path) -> Result<Vec<Question>, CorpusError> {
    let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    let set: QuestionSet =
        serde_json::from_str(&content).map_err(|e| CorpusError::parse(path, e))?;

    debug!(path = %path.display(), questions = set.questions.len(), "Questions loaded");
    Ok(set.questions)
}

/// Writes `{"answers": [...]}` as JSON indented by four spaces, non-ASCII kept as-is.
pub fn write_answers(path: &Path, results: &[RetrievalResult]) -> Result<(), CorpusError> {
    let sheet = AnswerSheet {
        answers: results.to_vec(),
    };

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    sheet
        .serialize(&mut ser)
        .map_err(|e| CorpusError::parse(path, e))?;
    fs::write(path, buf).map_err(|e| CorpusError::io(path, e))?;

    info!(path = %path.display(), answers = results.len(), "Answers written");
    Ok(())
}
