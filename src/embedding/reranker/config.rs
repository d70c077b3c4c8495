use std::path::PathBuf;

pub use crate::constants::DEFAULT_MAX_SEQ_LEN as MAX_SEQ_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RerankerConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    /// `None` runs the reranker in stub mode.
    pub model_path: Option<PathBuf>,

    /// Token budget per `(query, passage)` pair.
    pub max_seq_len: usize,
}

impl Default for RerankerConfig {
    fn default() -> Self {
        Self {
            model_path: None,
            max_seq_len: MAX_SEQ_LEN,
        }
    }
}

impl RerankerConfig {
    pub const ENV_MODEL_PATH: &'static str = "DOCSIFT_RERANKER_PATH";
    pub const ENV_MAX_SEQ_LEN: &'static str = "DOCSIFT_MAX_SEQ_LEN";

    pub fn new<P: Into<PathBuf>>(model_path: P) -> Self {
        Self {
            model_path: Some(model_path.into()),
            max_seq_len: MAX_SEQ_LEN,
        }
    }

    pub fn stub() -> Self {
        Self::default()
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.max_seq_len == 0 {
            return Err("max_seq_len must be greater than zero".to_string());
        }

        if let Some(ref path) = self.model_path
            && path.as_os_str().is_empty()
        {
            return Err("model_path cannot be empty when provided".to_string());
        }

        Ok(())
    }
}
