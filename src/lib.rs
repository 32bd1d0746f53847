//! Local retrieval-augmented generation building blocks.
//!
//! This crate provides:
//! - A polymorphic [`Embedder`] trait over local pretrained encoders,
//!   with BERT-family ([`BertEmbedder`]) and T5 ([`T5Embedder`]) backends
//!   running on candle
//! - Document loading for text and PDF files
//! - Fixed-size and recursive chunking
//! - An in-memory cosine-similarity [`VectorStore`]
//! - A [`RagPipeline`] with explicit `build_index` / `query` entry points
//!   and prompt assembly for a downstream generator

pub mod bert;
pub mod chunking;
pub mod config;
pub mod device;
pub mod document;
pub mod embedding;
pub mod error;
mod hub;
pub mod inmemory;
pub mod loader;
pub mod pipeline;
pub mod prompt;
pub mod t5;
pub mod vectorstore;

pub use bert::{ALL_MINILM_L6_V2, ALL_MINILM_L12_V2, BertEmbedder};
pub use chunking::{Chunker, FixedSizeChunker, RecursiveChunker};
pub use config::{RagConfig, RagConfigBuilder};
pub use device::ComputeDevice;
pub use document::{Chunk, Document, SearchResult};
pub use embedding::Embedder;
pub use error::{RagError, Result};
pub use inmemory::InMemoryVectorStore;
pub use loader::load_documents;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use prompt::build_prompt;
pub use t5::{T5_LARGE, T5Embedder};
pub use vectorstore::VectorStore;
