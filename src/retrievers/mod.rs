//! Retrievers module
//!
//! All retrievers implement the `Retriever` trait from `crate::schemas::Retriever`.

mod error;
pub use error::*;

mod contextual_compression;
pub use contextual_compression::*;
