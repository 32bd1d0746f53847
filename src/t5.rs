//! T5 encoder embedding backend using candle-transformers.
//!
//! Loads only the encoder stack of a sequence-to-sequence T5 checkpoint;
//! the decoder never comes into memory. Pooling follows the same plain
//! mean contract as the BERT variant.

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5::{Config, T5EncoderModel};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::device::ComputeDevice;
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::hub;

/// Checkpoint name of the large T5 encoder (1024 dims).
pub const T5_LARGE: &str = "t5-large";

/// T5 has no absolute position table; cap sequences the way the
/// reference tokenizer does.
const MAX_SEQ_LEN: usize = 512;

/// An [`Embedder`] backed by the encoder half of a local T5 checkpoint.
///
/// Same construction and pooling contract as [`BertEmbedder`]
/// (resolve under `models_dir/<model_name>`, truncating/padding
/// tokenization, no-gradient forward pass, plain mean over the sequence
/// axis, first batch row returned). The candle T5 encoder caches
/// relative-attention bias internally and so takes `&mut self` for
/// inference; a mutex serializes access, and callers wanting
/// concurrency must hold separate instances.
///
/// [`BertEmbedder`]: crate::BertEmbedder
pub struct T5Embedder {
    model: Mutex<T5EncoderModel>,
    tokenizer: Tokenizer,
    device: Device,
    model_name: String,
    dimensions: usize,
}

impl T5Embedder {
    /// Load the encoder of a T5 checkpoint by name.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::LoadError`] if the checkpoint cannot be
    /// resolved or parsed, or if the requested device is unavailable.
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
        tokenizer.with_padding(Some(PaddingParams {
            pad_token: "<pad>".to_string(),
            ..PaddingParams::default()
        }));
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQ_LEN,
                ..TruncationParams::default()
            }))
            .map_err(|e| load_error(format!("cannot configure truncation: {e}")))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], DType::F32, &device)
                .map_err(|e| load_error(format!("cannot map weights: {e}")))?
        };
        let model = T5EncoderModel::load(vb, &config)
            .map_err(|e| load_error(format!("cannot build encoder: {e}")))?;

        info!(model = model_name, dims = config.d_model, device = ?device, "loaded t5 encoder");

        Ok(Self {
            model: Mutex::new(model),
            tokenizer,
            device,
            model_name: model_name.to_string(),
            dimensions: config.d_model,
        })
    }

    /// Load the `t5-large` encoder on CPU.
    pub fn t5_large(models_dir: impl AsRef<Path>) -> Result<Self> {
        Self::new(models_dir, T5_LARGE, ComputeDevice::Cpu)
    }

    fn inference_error(&self, message: impl std::fmt::Display) -> RagError {
        RagError::EmbeddingError {
            model: self.model_name.clone(),
            message: message.to_string(),
        }
    }

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

        let mut model = self
            .model
            .lock()
            .map_err(|e| self.inference_error(format!("encoder lock poisoned: {e}")))?;

        // (1, seq, d_model) -> plain mean over the sequence axis, first
        // batch row as the sentence vector.
        let hidden = model.forward(&input_ids).map_err(|e| self.inference_error(e))?;
        let pooled = hidden.mean(1).map_err(|e| self.inference_error(e))?;
        pooled
            .squeeze(0)
            .and_then(|t| t.to_vec1::<f32>())
            .map_err(|e| self.inference_error(e))
    }
}

#[async_trait]
impl Embedder for T5Embedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        self.forward_pooled(text)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
