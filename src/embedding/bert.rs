use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use candle_transformers::models::xlm_roberta::{
    Config as XLMRobertaConfig, XLMRobertaForSequenceClassification,
};
use std::path::Path;

const ROBERTA_MARKER: &str = "roberta.embeddings.word_embeddings.weight";
const BERT_MARKER: &str = "bert.embeddings.word_embeddings.weight";

/// Encoder family, picked from the tensor names in the checkpoint.
enum Backbone {
    /// BERT encoder with a `classifier` linear layer over `[CLS]`.
    Bert {
        encoder: BertModel,
        classifier: Linear,
    },
    /// XLM-R encoder with the dense + tanh + out_proj head. Position ids follow the
    /// padding-aware RoBERTa scheme.
    XlmRoberta(XLMRobertaForSequenceClassification),
}

impl Backbone {
    fn load(vb: VarBuilder, config_json: &str) -> Result<Self> {
        if vb.contains_tensor(ROBERTA_MARKER) {
            let config: XLMRobertaConfig = parse_config(config_json)?;
            return Ok(Self::XlmRoberta(XLMRobertaForSequenceClassification::new(
                1, &config, vb,
            )?));
        }

        let config: BertConfig = parse_config(config_json)?;
        let encoder = if vb.contains_tensor(BERT_MARKER) {
            BertModel::load(vb.pp("bert"), &config)?
        } else {
            BertModel::load(vb.clone(), &config)?
        };
        let classifier = candle_nn::linear(config.hidden_size, 1, vb.pp("classifier"))?;

        Ok(Self::Bert {
            encoder,
            classifier,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Bert { .. } => "bert",
            Self::XlmRoberta(_) => "xlm-roberta",
        }
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        match self {
            Self::Bert {
                encoder,
                classifier,
            } => {
                let hidden = encoder.forward(input_ids, token_type_ids, Some(attention_mask))?;
                classifier.forward(&hidden.i((.., 0, ..))?)
            }
            Self::XlmRoberta(model) => model.forward(input_ids, attention_mask, token_type_ids),
        }
    }
}

fn parse_config<T: serde::de::DeserializeOwned>(config_json: &str) -> Result<T> {
    serde_json::from_str(config_json)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

/// Cross-encoder producing one relevance logit per `(query, passage)` row.
#[derive(Clone)]
pub struct SequencePairClassifier(std::sync::Arc<Backbone>);

impl SequencePairClassifier {
    /// Loads `config.json` and `model.safetensors` from `model_dir`.
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let config_json = std::fs::read_to_string(model_dir.join("config.json"))?;
        let weights_path = model_dir.join("model.safetensors");

        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device)? };

        Ok(Self(std::sync::Arc::new(Backbone::load(vb, &config_json)?)))
    }

    /// `bert` or `xlm-roberta`.
    pub fn backbone(&self) -> &'static str {
        self.0.name()
    }

    /// Inputs are `[batch, seq_len]`; output is `[batch, 1]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.0.forward(input_ids, token_type_ids, attention_mask)
    }
}
