//! 统一的错误处理模块
//!
//! 每个子模块都有自己的 thiserror 错误类型，这里把它们组合成一个顶层错误，
//! 便于调用方用 `?` 统一向上传播。

pub mod utils;

pub use crate::document_compressors::CompressorError;
pub use crate::document_transformers::TransformerError;
pub use crate::embedding::EmbedderError;
pub use crate::language_models::LLMError;
pub use crate::retrievers::RetrieverError;
pub use crate::text_splitter::TextSplitterError;
pub use utils::{error_context, error_info, ErrorCode, ErrorContext};

/// 统一的错误枚举，组合所有子模块错误
#[derive(thiserror::Error, Debug)]
pub enum LangChainError {
    #[error("Compressor error: {0}")]
    CompressorError(#[from] CompressorError),

    #[error("Transformer error: {0}")]
    TransformerError(#[from] TransformerError),

    #[error("Retriever error: {0}")]
    RetrieverError(#[from] RetrieverError),

    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Embedder error: {0}")]
    EmbedderError(#[from] EmbedderError),

    #[error("Text splitter error: {0}")]
    TextSplitterError(#[from] TextSplitterError),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

// 便利的类型别名
pub type Result<T> = std::result::Result<T, LangChainError>;
