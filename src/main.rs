//! Docsift batch retrieval entrypoint.

use std::time::Instant;

use mimalloc::MiMalloc;

use docsift::config::Config;
use docsift::corpus::load_corpus;
use docsift::embedding::Reranker;
use docsift::pipeline::{RetrievalPipeline, load_questions, write_answers};
use docsift::scoring::CrossEncoderSelector;
use docsift::structure::DateNormalizer;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        source_path = %config.source_path.display(),
        questions_path = %config.questions_path.display(),
        chunk_size = config.chunk_size,
        "Docsift starting"
    );
    let start = Instant::now();

    let corpus = load_corpus(&config.corpus_paths())?;
    let corpus = corpus.normalize_finance(&DateNormalizer::new()?);

    let questions = load_questions(&config.questions_path)?;

    if config.reranker_path.is_none() {
        tracing::warn!("No DOCSIFT_RERANKER_PATH configured, running reranker in stub mode");
    }
    let reranker = Reranker::load(config.reranker_config())?;
    let selector = CrossEncoderSelector::new(reranker)?;
    let pipeline = RetrievalPipeline::new(selector, config.chunk_size)?;

    let results = pipeline.run(&questions, &corpus)?;
    write_answers(&config.output_path, &results)?;

    tracing::info!(
        answers = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Docsift finished"
    );
    Ok(())
}
