//! The embedding adapter trait: a uniform "text → vector" contract over
//! heterogeneous local encoder backends.

use async_trait::async_trait;

use crate::error::Result;

/// An adapter that maps text to a fixed-length embedding vector.
///
/// Implementations wrap a loaded pretrained encoder (tokenizer + model,
/// bound to one compute device at construction) behind a single required
/// capability, [`embed_text`](Embedder::embed_text). Document and query
/// embedding are layered on top as provided methods so callers never
/// depend on backend-specific APIs.
///
/// For a given backend instance `embed_text` is a pure function of its
/// input: weights are fixed and inference involves no sampling, so
/// repeated calls yield identical vectors. Empty input is valid and
/// produces a vector of the usual dimensionality.
///
/// # Example
///
/// ```rust,ignore
/// use ragstack::{BertEmbedder, Embedder};
///
/// let embedder = BertEmbedder::all_minilm_l6_v2("./models")?;
/// let vector = embedder.embed_text("hello world").await?;
/// assert_eq!(vector.len(), embedder.dimensions());
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a vector of length [`dimensions`](Embedder::dimensions).
    ///
    /// Blocks until the backend's forward pass completes. Tokenizer and
    /// inference failures propagate to the caller unmodified; there is no
    /// retry or recovery at this layer.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a sequence of document texts, one vector per input.
    ///
    /// Applies [`embed_text`](Embedder::embed_text) to each element
    /// strictly in order. The output has the same length as the input
    /// with element-wise correspondence by index; inputs are never
    /// reordered, deduplicated, or dropped.
    async fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed_text(text).await?);
        }
        Ok(results)
    }

    /// Embed a query string.
    ///
    /// Currently identical to [`embed_text`](Embedder::embed_text). The
    /// separate entry point is kept because retrieval systems may apply
    /// asymmetric encoding for queries versus documents; no backend here
    /// diverges yet.
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_text(text).await
    }

    /// Return the fixed dimensionality of vectors produced by this backend.
    fn dimensions(&self) -> usize;
}
