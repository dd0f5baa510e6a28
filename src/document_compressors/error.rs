use thiserror::Error;

use crate::document_transformers::TransformerError;
use crate::embedding::EmbedderError;
use crate::language_models::LLMError;

#[derive(Error, Debug)]
pub enum CompressorError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Embedder error: {0}")]
    EmbedderError(#[from] EmbedderError),

    #[error("Transformer error: {0}")]
    TransformerError(#[from] TransformerError),

    #[error("Output parsing error: {0}")]
    OutputParsingError(String),

    #[error("Reranker error: {0}")]
    RerankerError(String),

    #[error("Compressor configuration error: {0}")]
    ConfigurationError(String),

    #[error("Blocking compression task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    #[error("Pipeline stage {stage} failed: {source}")]
    StageFailed {
        stage: usize,
        #[source]
        source: Box<CompressorError>,
    },

    #[error("Error: {0}")]
    OtherError(String),
}

impl CompressorError {
    /// Innermost error, looking through any pipeline stage annotations.
    pub fn root(&self) -> &CompressorError {
        match self {
            CompressorError::StageFailed { source, .. } => source.root(),
            other => other,
        }
    }
}
