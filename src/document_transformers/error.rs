use thiserror::Error;

use crate::embedding::EmbedderError;
use crate::text_splitter::TextSplitterError;

#[derive(Error, Debug)]
pub enum TransformerError {
    #[error("Embedder error: {0}")]
    EmbedderError(#[from] EmbedderError),

    #[error("Text splitter error: {0}")]
    TextSplitterError(#[from] TextSplitterError),

    #[error("Transformer configuration error: {0}")]
    ConfigurationError(String),

    #[error("Error: {0}")]
    OtherError(String),
}
