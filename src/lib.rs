//! # langchain-compressors
//!
//! Contextual compression for retrieval-augmented generation. Retrievers tend
//! to return more text than a prompt can use; compressors cut it down using
//! the query that produced it.
//!
//! ## Overview
//!
//! - **Compressors**: query-aware stages (embeddings filter, LLM filter, LLM extractor, Cohere rerank)
//! - **Transformers**: query-agnostic stages (redundancy filter, long-context reorder, text splitters)
//! - **Pipelines**: chain compressors and transformers, run in declaration order
//! - **Retrievers**: `ContextualCompressionRetriever` wraps any retriever with a compressor
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use langchain_compressors::document_compressors::{
//!     DocumentCompressor, DocumentCompressorPipeline, EmbeddingsFilter,
//! };
//! use langchain_compressors::document_transformers::{
//!     EmbeddingsRedundantFilter, TextSplitterTransformer,
//! };
//! use langchain_compressors::text_splitter::{CharacterTextSplitter, CharacterTextSplitterOptions};
//!
//! # async fn run(embedder: Arc<dyn langchain_compressors::embedding::Embedder>, docs: langchain_compressors::Documents) -> Result<(), Box<dyn std::error::Error>> {
//! let splitter = CharacterTextSplitter::new(
//!     CharacterTextSplitterOptions::new().with_chunk_size(300).with_separator(". "),
//! );
//! let pipeline = DocumentCompressorPipeline::builder()
//!     .transformer(TextSplitterTransformer::new(splitter))
//!     .transformer(EmbeddingsRedundantFilter::new(embedder.clone()))
//!     .compressor(EmbeddingsFilter::with_threshold(embedder, 0.76)?)
//!     .build();
//!
//! let compressed = pipeline.compress_documents(docs, "What is ownership?").await?;
//! # Ok(()) }
//! ```

/// Document compressors and the compressor pipeline.
pub mod document_compressors;
/// Document transformers: reordering, deduplication, splitting.
pub mod document_transformers;
/// Embedding model trait.
pub mod embedding;
/// Unified error types and utilities.
pub mod error;
/// LLM trait and invocation config.
pub mod language_models;
/// Retriever wrappers.
pub mod retrievers;
/// Schemas: documents, messages, retriever trait.
pub mod schemas;
/// Text splitters.
pub mod text_splitter;
/// Utilities: similarity, async helpers.
pub mod utils;

// ============================================================================
// Type Aliases for Common Type Combinations
// ============================================================================

use std::sync::Arc;

/// Type alias for a shared compressor
pub type Compressor = Arc<dyn crate::document_compressors::DocumentCompressor>;

/// Type alias for a shared transformer
pub type Transformer = Arc<dyn crate::document_transformers::DocumentTransformer>;

/// Type alias for embedding vector (f64)
pub type Embedding = Vec<f64>;

/// Type alias for document list
pub type Documents = Vec<crate::schemas::Document>;
