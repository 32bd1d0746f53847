//! Shared fixtures for integration tests: a deterministic stub embedder
//! and a minimal PDF generator. Tests never download model checkpoints.
#![allow(dead_code)]

use std::path::Path;

use async_trait::async_trait;
use ragstack::{Embedder, RagError, Result};

/// Words the stub embedder projects onto, one axis per word.
const VOCAB: [&str; 8] = ["cat", "mat", "sat", "paris", "capital", "france", "train", "sunny"];

/// A deterministic embedder mapping texts onto keyword-count axes plus a
/// constant bias axis, so even keyword-free text gets a nonzero vector.
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    pub const DIMS: usize = VOCAB.len() + 1;
}

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();
        let mut vector: Vec<f32> = VOCAB
            .iter()
            .map(|word| lower.matches(word).count() as f32)
            .collect();
        vector.push(1.0);
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        Self::DIMS
    }
}

/// An embedder whose every call fails, for exercising error propagation.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed_text(&self, _text: &str) -> Result<Vec<f32>> {
        Err(RagError::EmbeddingError {
            model: "failing".to_string(),
            message: "forward pass failed".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        KeywordEmbedder::DIMS
    }
}

/// Write a one-page PDF containing `text` to `path`.
pub fn write_pdf(path: &Path, text: &str) {
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 700.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}
