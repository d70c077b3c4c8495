pub mod config;
pub mod error;


pub use config::{MAX_SEQ_LEN, RerankerConfig};
pub use error::RerankerError;

use std::collections::HashSet;

use candle_core::Tensor;
use tokenizers::{EncodeInput, Encoding, Tokenizer};
use tracing::{debug, info};

use crate::embedding::bert::SequencePairClassifier;
use crate::embedding::device::select_device;
use crate::embedding::relevance::RelevanceModel;
use crate::embedding::utils::load_pair_tokenizer;

pub struct Reranker {
    device: candle_core::Device,
    config: RerankerConfig,
    model_loaded: bool,
    model: Option<SequencePairClassifier>,
    tokenizer: Option<Tokenizer>,
}

impl std::fmt::Debug for Reranker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reranker")
            .field("device", &format!("{:?}", self.device))
            .field("config", &self.config)
            .field("model_loaded", &self.model_loaded)
            .finish()
    }
}

impl Reranker {
    pub fn load(config: RerankerConfig) -> Result<Self, RerankerError> {
        if let Err(msg) = config.validate() {
            return Err(RerankerError::InvalidConfig { reason: msg });
        }

        let device = select_device().map_err(RerankerError::from)?;
        debug!(?device, "Selected compute device for reranker");

        let Some(model_path) = config.model_path.clone() else {
            info!("No reranker model path configured, operating in stub mode");
            return Ok(Self::create_stub(device, config));
        };

        if !model_path.exists() {
            return Err(RerankerError::ModelLoadFailed {
                reason: format!("Reranker model path not found: {}", model_path.display()),
            });
        }

        for required in ["config.json", "model.safetensors"] {
            if !model_path.join(required).exists() {
                return Err(RerankerError::ModelLoadFailed {
                    reason: format!("Missing {} in {}", required, model_path.display()),
                });
            }
        }

        info!(
            model_path = %model_path.display(),
            max_seq_len = config.max_seq_len,
            "Loading reranker model"
        );

        let model = SequencePairClassifier::load(&model_path, &device).map_err(|e| {
            RerankerError::ModelLoadFailed {
                reason: format!("Failed to load cross-encoder: {}", e),
            }
        })?;

        let tokenizer = load_pair_tokenizer(&model_path, config.max_seq_len)?;

        info!(backbone = model.backbone(), "Reranker model loaded successfully");

        Ok(Self {
            device,
            config,
            model_loaded: true,
            model: Some(model),
            tokenizer: Some(tokenizer),
        })
    }

    pub fn stub() -> Result<Self, RerankerError> {
        Self::load(RerankerConfig::stub())
    }

    fn create_stub(device: candle_core::Device, config: RerankerConfig) -> Self {
        Self {
            device,
            config,
            model_loaded: false,
            model: None,
            tokenizer: None,
        }
    }

    /// Scores every `(query, passage)` pair in one forward pass.
    ///
    /// Returns one raw logit per pair, in input order. An empty slice returns an empty vector
    /// without touching the model.
    pub fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            batch_size = pairs.len(),
            model_loaded = self.model_loaded,
            "Scoring query-passage batch"
        );

        if let (Some(model), Some(tokenizer)) = (&self.model, &self.tokenizer) {
            let inputs: Vec<EncodeInput<'_>> = pairs
                .iter()
                .map(|(query, passage)| EncodeInput::from((*query, *passage)))
                .collect();

            let encodings = tokenizer.encode_batch(inputs, true).map_err(|e| {
                RerankerError::TokenizationFailed {
                    reason: e.to_string(),
                }
            })?;

            let (input_ids, type_ids, attention_mask) = self.stack_encodings(&encodings)?;

            let logits = model
                .forward(&input_ids, &type_ids, &attention_mask)
                .map_err(|e| RerankerError::InferenceFailed {
                    reason: e.to_string(),
                })?;

            let scores = logits.flatten_all()?.to_vec1::<f32>()?;
            if scores.len() != pairs.len() {
                return Err(RerankerError::InferenceFailed {
                    reason: format!(
                        "model returned {} logits for {} pairs",
                        scores.len(),
                        pairs.len()
                    ),
                });
            }
            return Ok(scores);
        }

        let scores: Vec<f32> = pairs
            .iter()
            .map(|(query, passage)| self.compute_placeholder_score(query, passage))
            .collect();

        debug!(batch_size = scores.len(), "Computed scores (stub)");

        Ok(scores)
    }

    /// Packs padded encodings into `[batch, seq_len]` id, type-id and mask tensors.
    fn stack_encodings(
        &self,
        encodings: &[Encoding],
    ) -> Result<(Tensor, Tensor, Tensor), RerankerError> {
        let batch = encodings.len();
        let seq_len = encodings.first().map(Encoding::len).unwrap_or(0);

        let mut ids = Vec::with_capacity(batch * seq_len);
        let mut type_ids = Vec::with_capacity(batch * seq_len);
        let mut mask = Vec::with_capacity(batch * seq_len);

        for encoding in encodings {
            if encoding.len() != seq_len {
                return Err(RerankerError::TokenizationFailed {
                    reason: format!(
                        "ragged batch: expected {} tokens per row, got {}",
                        seq_len,
                        encoding.len()
                    ),
                });
            }
            ids.extend_from_slice(encoding.get_ids());
            type_ids.extend_from_slice(encoding.get_type_ids());
            mask.extend_from_slice(encoding.get_attention_mask());
        }

        let shape = (batch, seq_len);
        Ok((
            Tensor::from_vec(ids, shape, &self.device)?,
            Tensor::from_vec(type_ids, shape, &self.device)?,
            Tensor::from_vec(mask, shape, &self.device)?,
        ))
    }

    pub fn is_model_loaded(&self) -> bool {
        self.model_loaded
    }

    pub fn config(&self) -> &RerankerConfig {
        &self.config
    }

    pub fn device(&self) -> &candle_core::Device {
        &self.device
    }

    /// Character-bigram overlap score in `[0, 1]`.
    ///
    /// Policy and filing text has no word boundaries, so bigrams stand in for words.
    fn compute_placeholder_score(&self, query: &str, passage: &str) -> f32 {
        let query_grams = char_bigrams(query);
        let passage_grams = char_bigrams(passage);

        if query_grams.is_empty() {
            let (q, p) = (query.chars().count(), passage.chars().count());
            let len_ratio = (q.min(p) as f32) / (q.max(p).max(1) as f32);
            return len_ratio * 0.3;
        }

        let matches = query_grams.intersection(&passage_grams).count();
        let recall = matches as f32 / query_grams.len() as f32;

        let union = query_grams.union(&passage_grams).count();
        let jaccard = if union > 0 {
            matches as f32 / union as f32
        } else {
            0.0
        };

        let base_score = 0.6 * recall + 0.4 * jaccard;

        let normalized = 1.0 / (1.0 + (-8.0 * (base_score - 0.5)).exp());

        normalized.clamp(0.0, 1.0)
    }
}

impl RelevanceModel for Reranker {
    fn score_pairs(&self, pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        self.score_batch(pairs)
    }
}

fn char_bigrams(text: &str) -> HashSet<(char, char)> {
    let chars: Vec<char> = text
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}
