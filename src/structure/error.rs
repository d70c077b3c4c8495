use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("invalid {name} pattern: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("chunk size must be greater than zero, got {chunk_size}")]
    InvalidChunkSize { chunk_size: usize },
}
