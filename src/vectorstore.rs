//! Vector store trait for storing and searching embedding vectors.

use async_trait::async_trait;

use crate::document::{Chunk, SearchResult};
use crate::error::Result;

/// A storage backend holding embedded [`Chunk`]s for similarity search.
///
/// A store instance is bound to one embedding dimensionality; every
/// vector added to it must have that length. This is what keeps a store
/// from silently mixing the output of different encoders.
///
/// # Example
///
/// ```rust,ignore
/// use ragstack::{InMemoryVectorStore, VectorStore};
///
/// let store = InMemoryVectorStore::new(384);
/// store.add(&chunks).await?;
/// let results = store.search(&query_embedding, 5).await?;
/// ```
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Add chunks to the store, keyed by chunk ID (re-adding an ID
    /// replaces the previous entry). Chunks must have embeddings of the
    /// store's dimensionality.
    async fn add(&self, chunks: &[Chunk]) -> Result<()>;

    /// Search for the `top_k` chunks most similar to the given embedding.
    ///
    /// Returns results ordered by descending similarity score.
    async fn search(&self, embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// The dimensionality every stored vector must have.
    fn dimensions(&self) -> usize;
}
