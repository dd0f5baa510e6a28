mod error;
pub mod embedder_trait;

pub use embedder_trait::*;
pub use error::*;
