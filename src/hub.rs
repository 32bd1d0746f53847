//! Checkpoint resolution against a local models directory.
//!
//! Artifacts for a checkpoint `name` live under `models_dir/name`. When
//! the three files a backend needs (`tokenizer.json`, `config.json`,
//! `model.safetensors`) are already present there they are used as-is;
//! otherwise they are fetched through the HuggingFace hub API with that
//! directory as its cache, so later constructions are offline.

use std::path::{Path, PathBuf};

use hf_hub::api::sync::ApiBuilder;
use tracing::{debug, info};

use crate::error::{RagError, Result};

/// Resolved paths of the artifacts a backend loads.
pub(crate) struct CheckpointFiles {
    pub tokenizer: PathBuf,
    pub config: PathBuf,
    pub weights: PathBuf,
}

/// Resolve a checkpoint's artifacts, downloading into the per-model
/// cache directory when they are not already there.
///
/// Any failure — unknown checkpoint name, unreachable hub, unreadable
/// cache — surfaces as [`RagError::LoadError`].
pub(crate) fn resolve_checkpoint(models_dir: &Path, model_name: &str) -> Result<CheckpointFiles> {
    let load_error = |message: String| RagError::LoadError {
        model: model_name.to_string(),
        message,
    };

    let cache_dir = models_dir.join(model_name);
    let local = CheckpointFiles {
        tokenizer: cache_dir.join("tokenizer.json"),
        config: cache_dir.join("config.json"),
        weights: cache_dir.join("model.safetensors"),
    };
    if local.tokenizer.is_file() && local.config.is_file() && local.weights.is_file() {
        debug!(model = model_name, dir = %cache_dir.display(), "using cached checkpoint");
        return Ok(local);
    }

    info!(model = model_name, dir = %cache_dir.display(), "fetching checkpoint");

    std::fs::create_dir_all(&cache_dir)
        .map_err(|e| load_error(format!("cannot create cache dir {}: {e}", cache_dir.display())))?;

    let api = ApiBuilder::new()
        .with_cache_dir(cache_dir)
        .build()
        .map_err(|e| load_error(format!("hub api init failed: {e}")))?;
    let repo = api.model(model_name.to_string());

    let fetch = |file: &str| {
        repo.get(file).map_err(|e| load_error(format!("cannot fetch {file}: {e}")))
    };

    Ok(CheckpointFiles {
        tokenizer: fetch("tokenizer.json")?,
        config: fetch("config.json")?,
        weights: fetch("model.safetensors")?,
    })
}
