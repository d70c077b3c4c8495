//! Batch retrieval: questions in, one selected document per question out.
//!
//! Every question is validated (category name and loaded corpus) before the first
//! scoring call, so a bad batch fails without touching the model.

pub mod error;
pub mod io;
pub mod runner;
pub mod types;


pub use error::PipelineError;
pub use io::{load_questions, write_answers};
pub use runner::RetrievalPipeline;
pub use types::{AnswerSheet, Question, QuestionSet, RetrievalResult};
