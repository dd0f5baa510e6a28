//! Document transformers
//!
//! Query-agnostic stages that take a list of documents and return a new one:
//! reordering, deduplication, splitting.

mod error;
pub use error::*;

mod transformer;
pub use transformer::*;

mod long_context_reorder;
pub use long_context_reorder::*;

mod embeddings_redundant_filter;
pub use embeddings_redundant_filter::*;

mod text_splitter_transformer;
pub use text_splitter_transformer::*;
