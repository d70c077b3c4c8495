use std::path::Path;
use tokenizers::{PaddingDirection, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Pad tokens tried in order when the tokenizer file has no padding section.
const PAD_TOKEN_CANDIDATES: [&str; 2] = ["<pad>", "[PAD]"];

/// Loads a tokenizer from a model directory or an explicit `tokenizer.json` path.
pub fn load_tokenizer(model_path: &Path) -> Result<Tokenizer, EmbeddingError> {
    let tokenizer_path = if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new("tokenizer.json"))
    {
        model_path.to_path_buf()
    } else {
        model_path.join("tokenizer.json")
    };

    if !tokenizer_path.exists() {
        return Err(EmbeddingError::TokenizerNotFound {
            path: tokenizer_path,
        });
    }

    Tokenizer::from_file(&tokenizer_path).map_err(|e| EmbeddingError::TokenizerLoadFailed {
        reason: e.to_string(),
    })
}

/// Loads a tokenizer configured for batched sequence-pair scoring.
///
/// Pairs longer than `max_len` tokens are truncated (longest sequence first) and every batch
/// is right-padded to its longest pair, so rows stack into one `[batch, seq_len]` tensor.
pub fn load_pair_tokenizer(model_path: &Path, max_len: usize) -> Result<Tokenizer, EmbeddingError> {
    let mut tokenizer = load_tokenizer(model_path)?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };
    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::InvalidConfig {
            reason: format!("Failed to configure truncation: {}", e),
        })?;

    let padding = match tokenizer.get_padding() {
        Some(existing) => PaddingParams {
            strategy: PaddingStrategy::BatchLongest,
            direction: PaddingDirection::Right,
            ..existing.clone()
        },
        None => {
            let (pad_token, pad_id) = PAD_TOKEN_CANDIDATES
                .iter()
                .find_map(|token| tokenizer.token_to_id(token).map(|id| (*token, id)))
                .unwrap_or(("[PAD]", 0));
            PaddingParams {
                strategy: PaddingStrategy::BatchLongest,
                direction: PaddingDirection::Right,
                pad_id,
                pad_token: pad_token.to_string(),
                ..Default::default()
            }
        }
    };
    tokenizer.with_padding(Some(padding));

    Ok(tokenizer)
}
