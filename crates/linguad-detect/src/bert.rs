//! Candle-based BERT sequence-classification engine
//!
//! Loads a Hugging Face model directory (config, tokenizer, weights), builds
//! the BERT encoder plus pooler and classification head, and scores texts
//! against every label the model supports. Loading is the only expensive
//! operation and happens once; inference runs on CPU through `&self`.

use async_trait::async_trait;
use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::{api::sync::Api, Repo, RepoType};
use linguad_core::{Error, LabelScore, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

use crate::engine::InferenceEngine;

/// Maximum sequence length fed to the encoder; longer inputs are truncated
const MAX_SEQ_LENGTH: usize = 512;

/// The slice of the model's `config.json` that candle's BERT config ignores
#[derive(Debug, Deserialize)]
struct HubMetadata {
    #[serde(default)]
    id2label: Option<HashMap<String, String>>,
}

/// BERT sequence-classification engine
pub struct BertEngine {
    name: String,
    bert: BertModel,
    pooler: Linear,
    classifier: Linear,
    tokenizer: Tokenizer,
    device: Device,
    id2label: BTreeMap<usize, String>,
}

impl BertEngine {
    /// Load an engine from a model reference.
    ///
    /// A reference that exists on disk is used as a local model directory;
    /// anything else is treated as a Hugging Face repo id and fetched once.
    pub fn new(model_path: &str) -> Result<Self> {
        let model_dir = resolve_model_dir(model_path)?;

        // HF config.json carries both the encoder shape and the label table
        let config_path = model_dir.join("config.json");
        let config_str = std::fs::read_to_string(&config_path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", config_path.display()))
        })?;
        let bert_config: BertConfig = serde_json::from_str(&config_str)
            .map_err(|e| Error::config(format!("failed to parse model config: {e}")))?;
        let metadata: HubMetadata = serde_json::from_str(&config_str)
            .map_err(|e| Error::config(format!("failed to parse model config: {e}")))?;

        let id2label = parse_id2label(metadata.id2label)?;
        let num_labels = id2label.len();

        let mut tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| Error::engine(format!("failed to load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| Error::engine(format!("failed to configure truncation: {e}")))?;

        let device = Device::Cpu;
        let vb = load_weights(&model_dir, &device)?;

        let bert = BertModel::load(vb.pp("bert"), &bert_config)
            .map_err(|e| Error::engine(format!("failed to load BERT encoder: {e}")))?;
        let pooler = candle_nn::linear(
            bert_config.hidden_size,
            bert_config.hidden_size,
            vb.pp("bert").pp("pooler").pp("dense"),
        )
        .map_err(|e| Error::engine(format!("failed to load pooler: {e}")))?;
        let classifier =
            candle_nn::linear(bert_config.hidden_size, num_labels, vb.pp("classifier"))
                .map_err(|e| Error::engine(format!("failed to load classification head: {e}")))?;

        tracing::info!(
            "loaded BERT classifier '{}' with {} labels",
            model_path,
            num_labels
        );

        Ok(Self {
            name: model_path.to_string(),
            bert,
            pooler,
            classifier,
            tokenizer,
            device,
            id2label,
        })
    }

    /// Run the forward pass and return softmax probabilities per class
    fn forward(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::engine(format!("tokenization failed: {e}")))?;

        let token_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::engine(format!("failed to build input tensor: {e}")))?;
        let token_type_ids = token_ids
            .zeros_like()
            .map_err(|e| Error::engine(format!("failed to build token type tensor: {e}")))?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::engine(format!("failed to build attention mask: {e}")))?;

        let sequence_output = self
            .bert
            .forward(&token_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| Error::engine(format!("forward pass failed: {e}")))?;

        // Standard BERT pooling: [CLS] token -> linear -> tanh, then the head
        let probabilities = sequence_output
            .i((.., 0))
            .and_then(|cls| self.pooler.forward(&cls))
            .and_then(|pooled| pooled.tanh())
            .and_then(|pooled| self.classifier.forward(&pooled))
            .and_then(|logits| candle_nn::ops::softmax(&logits, 1))
            .and_then(|probs| probs.squeeze(0))
            .and_then(|probs| probs.to_vec1::<f32>())
            .map_err(|e| Error::engine(format!("classification head failed: {e}")))?;

        Ok(probabilities)
    }
}

#[async_trait]
impl InferenceEngine for BertEngine {
    async fn score(&self, text: &str) -> Result<Vec<LabelScore>> {
        let probabilities = self.forward(text)?;

        Ok(probabilities
            .into_iter()
            .enumerate()
            .map(|(index, score)| {
                let label = self
                    .id2label
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| format!("LABEL_{index}"));
                LabelScore::new(label, score)
            })
            .collect())
    }

    fn id2label(&self) -> Option<&BTreeMap<usize, String>> {
        Some(&self.id2label)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Resolve a model reference to a directory on disk, downloading from the
/// Hugging Face Hub when the reference is not a local path
fn resolve_model_dir(model_path: &str) -> Result<PathBuf> {
    let path = Path::new(model_path);
    if path.exists() {
        return Ok(path.to_path_buf());
    }

    tracing::info!("model '{}' not found locally, fetching from Hugging Face Hub", model_path);
    let api = Api::new()
        .map_err(|e| Error::config(format!("failed to initialize Hugging Face API: {e}")))?;
    let repo = api.repo(Repo::new(model_path.to_string(), RepoType::Model));

    let config_path = repo
        .get("config.json")
        .map_err(|e| Error::config(format!("failed to download config.json: {e}")))?;
    for file in ["tokenizer.json", "model.safetensors"] {
        repo.get(file)
            .map_err(|e| Error::config(format!("failed to download {file}: {e}")))?;
    }

    let model_dir = config_path
        .parent()
        .ok_or_else(|| Error::config("invalid Hugging Face cache path"))?;
    Ok(model_dir.to_path_buf())
}

/// Load model weights into a VarBuilder, preferring SafeTensors
fn load_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        return unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, device) }
            .map_err(|e| Error::engine(format!("failed to load SafeTensors weights: {e}")));
    }

    let pytorch = model_dir.join("pytorch_model.bin");
    if pytorch.exists() {
        return VarBuilder::from_pth(&pytorch, DType::F32, device)
            .map_err(|e| Error::engine(format!("failed to load PyTorch weights: {e}")));
    }

    Err(Error::config(format!(
        "no model weights found in {}",
        model_dir.display()
    )))
}

/// Convert the raw `id2label` map (string indices) into an index-keyed map
fn parse_id2label(raw: Option<HashMap<String, String>>) -> Result<BTreeMap<usize, String>> {
    let raw = raw.ok_or_else(|| {
        Error::config("model config.json has no id2label; cannot size the classification head")
    })?;
    if raw.is_empty() {
        return Err(Error::config("model config.json has an empty id2label"));
    }

    let mut id2label = BTreeMap::new();
    for (key, value) in raw {
        let index: usize = key
            .parse()
            .map_err(|_| Error::config(format!("invalid id2label index: {key}")))?;
        id2label.insert(index, value);
    }
    Ok(id2label)
}
