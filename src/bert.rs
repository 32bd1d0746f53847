//! BERT-family embedding backend using candle-transformers.
//!
//! This is the generic encoder variant: any BERT-compatible checkpoint
//! (the sentence-transformers MiniLM family in particular) loaded by
//! name from a local models directory, with two preset constructors for
//! the checkpoints the demo pipeline ships with.

use std::path::Path;

use async_trait::async_trait;
use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config, DTYPE};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::device::ComputeDevice;
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::hub;

/// Checkpoint name of the 6-layer MiniLM sentence encoder (384 dims).
pub const ALL_MINILM_L6_V2: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Checkpoint name of the 12-layer MiniLM sentence encoder (384 dims).
pub const ALL_MINILM_L12_V2: &str = "sentence-transformers/all-MiniLM-L12-v2";

/// An [`Embedder`] backed by a local BERT-family encoder.
///
/// Construction resolves the checkpoint under `models_dir/<model_name>`
/// (downloading on first use), loads tokenizer and weights, and binds
/// the model to the requested device. The handle is immutable for its
/// lifetime; dropping it releases the weights.
///
/// Texts are tokenized with truncation and padding enabled, run through
/// the encoder without gradients, and pooled by plain arithmetic mean
/// over the token-sequence axis of the last hidden state. Inputs longer
/// than the model's maximum sequence length are silently truncated.
///
/// # Example
///
/// ```rust,ignore
/// use ragstack::{BertEmbedder, Embedder};
///
/// let embedder = BertEmbedder::all_minilm_l6_v2("./models")?;
/// let vector = embedder.embed_text("The cat sat on the mat.").await?;
/// assert_eq!(vector.len(), 384);
/// ```
pub struct BertEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
    dimensions: usize,
}

impl BertEmbedder {
    /// Load a BERT-family checkpoint by name.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LoadError`] if the checkpoint cannot be
    /// resolved or parsed, or if the requested device is unavailable.
    /// On error no partial backend exists.
    pub fn new(
        models_dir: impl AsRef<Path>,
        model_name: &str,
        device: ComputeDevice,
    ) -> Result<Self> {
        let load_error = |message: String| RagError::LoadError {
            model: model_name.to_string(),
            message,
        };

        let files = hub::resolve_checkpoint(models_dir.as_ref(), model_name)?;
        let device = device.to_candle(model_name)?;

        let config_file = std::fs::File::open(&files.config)
            .map_err(|e| load_error(format!("cannot open config.json: {e}")))?;
        let config: Config = serde_json::from_reader(config_file)
            .map_err(|e| load_error(format!("cannot parse config.json: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| load_error(format!("cannot load tokenizer: {e}")))?;
        tokenizer.with_padding(Some(PaddingParams::default()));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                ..TruncationParams::default()
            }))
            .map_err(|e| load_error(format!("cannot configure truncation: {e}")))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DTYPE, &device)
                .map_err(|e| load_error(format!("cannot map weights: {e}")))?
        };
        let model = BertModel::load(vb, &config)
            .map_err(|e| load_error(format!("cannot build model: {e}")))?;

        info!(model = model_name, dims = config.hidden_size, device = ?device, "loaded bert encoder");

        Ok(Self {
            model,
            tokenizer,
            device,
            model_name: model_name.to_string(),
            dimensions: config.hidden_size,
        })
    }

    /// Load `sentence-transformers/all-MiniLM-L6-v2` on CPU.
    pub fn all_minilm_l6_v2(models_dir: impl AsRef<Path>) -> Result<Self> {
        Self::new(models_dir, ALL_MINILM_L6_V2, ComputeDevice::Cpu)
    }

    /// Load `sentence-transformers/all-MiniLM-L12-v2` on CPU.
    pub fn all_minilm_l12_v2(models_dir: impl AsRef<Path>) -> Result<Self> {
        Self::new(models_dir, ALL_MINILM_L12_V2, ComputeDevice::Cpu)
    }

    fn inference_error(&self, message: impl std::fmt::Display) -> RagError {
        RagError::EmbeddingError {
            model: self.model_name.clone(),
            message: message.to_string(),
        }
    }

    /// Tokenize, run the encoder, and mean-pool the last hidden state.
    fn forward_pooled(&self, text: &str) -> Result<Vec<f32>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| self.inference_error(e))?;

        let seq_len = encoding.get_ids().len();
        debug!(model = %self.model_name, seq_len, "embedding text");

        let input_ids = Tensor::new(encoding.get_ids(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| self.inference_error(e))?;
        let token_type_ids = input_ids.zeros_like().map_err(|e| self.inference_error(e))?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| self.inference_error(e))?;

        // (1, seq, hidden) -> plain mean over the sequence axis; not
        // mask-weighted, not normalized.
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))
            .map_err(|e| self.inference_error(e))?;
        let pooled = hidden.mean(1).map_err(|e| self.inference_error(e))?;
        pooled
            .squeeze(0)
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| self.inference_error(e))
    }
}

#[async_trait]
impl Embedder for BertEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        self.forward_pooled(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
