//! In-memory vector store using cosine similarity.
//!
//! [`InMemoryVectorStore`] is a brute-force store backed by a `HashMap`
//! behind a `tokio::sync::RwLock`. It is the store the demo pipeline
//! runs on and is sized for development and small corpora.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::document::{Chunk, SearchResult};
use crate::error::{RagError, Result};
use crate::vectorstore::VectorStore;

const BACKEND: &str = "InMemory";

/// An in-memory vector store using cosine similarity for search.
#[derive(Debug)]
pub struct InMemoryVectorStore {
    chunks: RwLock<HashMap<String, Chunk>>,
    dimensions: usize,
}

impl InMemoryVectorStore {
    /// Create an empty store accepting vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { chunks: RwLock::new(HashMap::new()), dimensions }
    }

    /// Number of chunks currently stored.
    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    /// Whether the store holds no chunks.
    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

/// Compute cosine similarity between two vectors.
///
/// Returns 0.0 if either vector has zero magnitude.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, chunks: &[Chunk]) -> Result<()> {
        for chunk in chunks {
            if chunk.embedding.len() != self.dimensions {
                return Err(RagError::VectorStoreError {
                    backend: BACKEND.to_string(),
                    message: format!(
                        "chunk '{}' has embedding of length {}, store expects {}",
                        chunk.id,
                        chunk.embedding.len(),
                        self.dimensions
                    ),
                });
            }
        }
        let mut store = self.chunks.write().await;
        for chunk in chunks {
            store.insert(chunk.id.clone(), chunk.clone());
        }
        Ok(())
    }

    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        if embedding.len() != self.dimensions {
            return Err(RagError::VectorStoreError {
                backend: BACKEND.to_string(),
                message: format!(
                    "query embedding has length {}, store expects {}",
                    embedding.len(),
                    self.dimensions
                ),
            });
        }

        let store = self.chunks.read().await;
        let mut scored: Vec<SearchResult> = store
            .values()
            .map(|chunk| SearchResult {
                score: cosine_similarity(&chunk.embedding, embedding),
                chunk: chunk.clone(),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}
