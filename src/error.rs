//! Error types for the `ragstack` crate.

use thiserror::Error;

/// Errors that can occur in RAG operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// A model backend could not be constructed.
    ///
    /// Covers bad checkpoint names, missing or corrupt cached artifacts,
    /// an unreachable hub, and unavailable compute devices. Network and
    /// cache failures are not distinguished further.
    #[error("failed to load model '{model}': {message}")]
    LoadError {
        /// The checkpoint name that failed to load.
        model: String,
        /// A description of the failure.
        message: String,
    },

    /// Tokenization or inference failed while embedding text.
    ///
    /// Passed through from the backend without retries or recovery.
    #[error("embedding failed ({model}): {message}")]
    EmbeddingError {
        /// The checkpoint name of the backend that produced the error.
        model: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the vector store backend.
    #[error("vector store error ({backend}): {message}")]
    VectorStoreError {
        /// The vector store backend that produced the error.
        backend: String,
        /// A description of the failure.
        message: String,
    },

    /// A document could not be read from disk.
    #[error("failed to read document '{path}': {message}")]
    DocumentError {
        /// The path of the document that failed to load.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred during document chunking.
    #[error("chunking error: {0}")]
    ChunkingError(String),

    /// A configuration validation error.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// An error in the pipeline orchestration.
    #[error("pipeline error: {0}")]
    PipelineError(String),
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
