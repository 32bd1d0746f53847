//! Backend construction failure tests.
//!
//! These exercise the load path against corrupt cached artifacts so no
//! test ever reaches the network: the loader finds the three expected
//! files locally and construction then fails parsing them.

use std::path::Path;

use ragstack::{BertEmbedder, ComputeDevice, RagError, T5Embedder};

fn seed_corrupt_checkpoint(models_dir: &Path, model_name: &str) {
    let cache_dir = models_dir.join(model_name);
    std::fs::create_dir_all(&cache_dir).unwrap();
    for file in ["tokenizer.json", "config.json", "model.safetensors"] {
        std::fs::write(cache_dir.join(file), b"not valid content").unwrap();
    }
}

#[test]
fn bert_construction_fails_with_load_error_on_corrupt_cache() {
    let models_dir = tempfile::tempdir().unwrap();
    seed_corrupt_checkpoint(models_dir.path(), "corrupt-model");

    let result = BertEmbedder::new(models_dir.path(), "corrupt-model", ComputeDevice::Cpu);
    assert!(matches!(result, Err(RagError::LoadError { .. })));
}

#[test]
fn t5_construction_fails_with_load_error_on_corrupt_cache() {
    let models_dir = tempfile::tempdir().unwrap();
    seed_corrupt_checkpoint(models_dir.path(), "corrupt-t5");

    let result = T5Embedder::new(models_dir.path(), "corrupt-t5", ComputeDevice::Cpu);
    assert!(matches!(result, Err(RagError::LoadError { .. })));
}

#[test]
fn load_error_names_the_model() {
    let models_dir = tempfile::tempdir().unwrap();
    seed_corrupt_checkpoint(models_dir.path(), "corrupt-model");

    let err = BertEmbedder::new(models_dir.path(), "corrupt-model", ComputeDevice::Cpu)
        .err()
        .unwrap();
    assert!(err.to_string().contains("corrupt-model"));
}
