//! Document compressors
//!
//! A compressor takes the documents a retriever returned together with the
//! query that produced them and returns a smaller or rewritten list. Compressors
//! and [`DocumentTransformer`](crate::document_transformers::DocumentTransformer)s
//! compose through [`DocumentCompressorPipeline`].

mod error;
pub use error::*;

mod base;
pub use base::*;

mod blocking;
pub use blocking::*;

mod pipeline;
pub use pipeline::*;

mod output_parsers;
pub use output_parsers::*;

mod prompt;

mod embeddings_filter;
pub use embeddings_filter::*;

mod llm_chain_filter;
pub use llm_chain_filter::*;

mod llm_chain_extractor;
pub use llm_chain_extractor::*;

#[cfg(feature = "cohere")]
mod cohere_rerank;
#[cfg(feature = "cohere")]
pub use cohere_rerank::*;
