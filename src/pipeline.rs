//! RAG pipeline orchestrator.
//!
//! [`RagPipeline`] composes an [`Embedder`], a [`VectorStore`], and a
//! [`Chunker`] behind two explicit entry points: [`build_index`] for
//! ingestion and [`query`] for retrieval. Nothing happens at
//! construction time beyond validation; indexing and querying are
//! always explicit calls.
//!
//! [`build_index`]: RagPipeline::build_index
//! [`query`]: RagPipeline::query
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ragstack::{
//!     BertEmbedder, Embedder, InMemoryVectorStore, RagConfig, RagPipeline, RecursiveChunker,
//! };
//!
//! let embedder = Arc::new(BertEmbedder::all_minilm_l12_v2("./models")?);
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .vector_store(Arc::new(InMemoryVectorStore::new(embedder.dimensions())))
//!     .chunker(Arc::new(RecursiveChunker::new(500, 50)))
//!     .embedder(embedder)
//!     .build()?;
//!
//! pipeline.build_index("./documents").await?;
//! let results = pipeline.query("Where is the capital of France?").await?;
//! ```

use std::path::Path;
use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::Chunker;
use crate::config::RagConfig;
use crate::document::{Chunk, Document, SearchResult};
use crate::embedding::Embedder;
use crate::error::{RagError, Result};
use crate::loader;
use crate::vectorstore::VectorStore;

/// The RAG pipeline orchestrator.
///
/// Coordinates document ingestion (chunk → embed → store) and query
/// execution (embed → search → filter). Construct one via
/// [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    embedder: Arc<dyn Embedder>,
    vector_store: Arc<dyn VectorStore>,
    chunker: Arc<dyn Chunker>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Return a reference to the embedder.
    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    /// Return a reference to the vector store.
    pub fn vector_store(&self) -> &Arc<dyn VectorStore> {
        &self.vector_store
    }

    /// Load every document in `docs_dir` and ingest it: load → chunk →
    /// embed → store.
    ///
    /// Returns all chunks that were stored. This is the explicit
    /// index-building entry point; call it once per corpus, then
    /// [`query`](RagPipeline::query) as often as needed.
    pub async fn build_index(&self, docs_dir: impl AsRef<Path>) -> Result<Vec<Chunk>> {
        let documents = loader::load_documents(docs_dir)?;
        self.ingest_batch(&documents).await
    }

    /// Ingest a single document: chunk → embed → store.
    ///
    /// Returns the chunks that were stored, embeddings attached.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::PipelineError`] if embedding or storage fails,
    /// naming the document in the message.
    pub async fn ingest(&self, document: &Document) -> Result<Vec<Chunk>> {
        let mut chunks = self.chunker.chunk(document);
        if chunks.is_empty() {
            info!(document.id = %document.id, chunk_count = 0, "ingested document (empty)");
            return Ok(chunks);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_documents(&texts).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "embedding failed during ingestion");
            RagError::PipelineError(format!("embedding failed for document '{}': {e}", document.id))
        })?;

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }

        self.vector_store.add(&chunks).await.map_err(|e| {
            error!(document.id = %document.id, error = %e, "store add failed during ingestion");
            RagError::PipelineError(format!("store add failed for document '{}': {e}", document.id))
        })?;

        info!(document.id = %document.id, chunk_count = chunks.len(), "ingested document");
        Ok(chunks)
    }

    /// Ingest multiple documents through the chunk → embed → store workflow.
    ///
    /// Documents are processed strictly in order; the first failure stops
    /// the batch.
    pub async fn ingest_batch(&self, documents: &[Document]) -> Result<Vec<Chunk>> {
        let mut all_chunks = Vec::new();
        for document in documents {
            all_chunks.extend(self.ingest(document).await?);
        }
        Ok(all_chunks)
    }

    /// Query the index: embed the question, search, filter by threshold.
    ///
    /// Returns at most `top_k` results ordered by descending similarity,
    /// with results below the configured `similarity_threshold` dropped.
    pub async fn query(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed_query(question).await.map_err(|e| {
            error!(error = %e, "embedding failed during query");
            RagError::PipelineError(format!("query embedding failed: {e}"))
        })?;

        let results = self
            .vector_store
            .search(&query_embedding, self.config.top_k)
            .await
            .map_err(|e| {
                error!(error = %e, "vector store search failed");
                RagError::PipelineError(format!("search failed: {e}"))
            })?;

        let threshold = self.config.similarity_threshold;
        let filtered: Vec<SearchResult> =
            results.into_iter().filter(|r| r.score >= threshold).collect();

        info!(result_count = filtered.len(), "query completed");
        Ok(filtered)
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// All fields except `config` are required; `config` falls back to
/// [`RagConfig::default()`]. [`build()`](RagPipelineBuilder::build)
/// validates that the embedder and store agree on dimensionality.
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    embedder: Option<Arc<dyn Embedder>>,
    vector_store: Option<Arc<dyn VectorStore>>,
    chunker: Option<Arc<dyn Chunker>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the embedding backend.
    pub fn embedder(mut self, embedder: Arc<dyn Embedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Set the vector store backend.
    pub fn vector_store(mut self, store: Arc<dyn VectorStore>) -> Self {
        self.vector_store = Some(store);
        self
    }

    /// Set the document chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Build the [`RagPipeline`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if a required component is
    /// missing or the store's dimensionality differs from the embedder's.
    pub fn build(self) -> Result<RagPipeline> {
        let config = self.config.unwrap_or_default();
        let embedder = self
            .embedder
            .ok_or_else(|| RagError::ConfigError("embedder is required".to_string()))?;
        let vector_store = self
            .vector_store
            .ok_or_else(|| RagError::ConfigError("vector_store is required".to_string()))?;
        let chunker =
            self.chunker.ok_or_else(|| RagError::ConfigError("chunker is required".to_string()))?;

        if vector_store.dimensions() != embedder.dimensions() {
            return Err(RagError::ConfigError(format!(
                "vector store expects {}-dim vectors but the embedder produces {}-dim",
                vector_store.dimensions(),
                embedder.dimensions()
            )));
        }

        Ok(RagPipeline { config, embedder, vector_store, chunker })
    }
}
