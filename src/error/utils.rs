//! 错误处理工具函数
//!
//! 提供错误代码和上下文信息，便于日志记录和错误分类。

use std::collections::HashMap;
use std::fmt;

use super::{CompressorError, LangChainError};

/// 错误代码系统
///
/// 为不同类型的错误分配唯一的错误代码。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Compressor 相关错误 (1000-1999)
    CompressorError = 1000,
    CompressorOutputParsing = 1001,
    CompressorReranker = 1002,
    CompressorPipelineStage = 1003,
    CompressorTaskJoin = 1004,

    /// Transformer 相关错误 (2000-2999)
    TransformerError = 2000,

    /// Retriever 相关错误 (3000-3999)
    RetrieverError = 3000,

    /// LLM 相关错误 (4000-4999)
    LLMError = 4000,

    /// Embedder 相关错误 (5000-5999)
    EmbedderError = 5000,

    /// Text splitter 相关错误 (6000-6999)
    TextSplitterError = 6000,

    /// 通用错误 (9000-9999)
    ConfigurationError = 9000,
    JsonError = 9002,
    UnknownError = 9999,
}

impl ErrorCode {
    /// 从 LangChainError 获取错误代码
    pub fn from_error(error: &LangChainError) -> Self {
        match error {
            LangChainError::CompressorError(e) => Self::from_compressor_error(e),
            LangChainError::TransformerError(_) => ErrorCode::TransformerError,
            LangChainError::RetrieverError(_) => ErrorCode::RetrieverError,
            LangChainError::LLMError(_) => ErrorCode::LLMError,
            LangChainError::EmbedderError(_) => ErrorCode::EmbedderError,
            LangChainError::TextSplitterError(_) => ErrorCode::TextSplitterError,
            LangChainError::ConfigurationError(_) => ErrorCode::ConfigurationError,
            LangChainError::JsonError(_) => ErrorCode::JsonError,
            LangChainError::Unknown(_) => ErrorCode::UnknownError,
        }
    }

    fn from_compressor_error(error: &CompressorError) -> Self {
        match error {
            CompressorError::OutputParsingError(_) => ErrorCode::CompressorOutputParsing,
            CompressorError::RerankerError(_) => ErrorCode::CompressorReranker,
            CompressorError::StageFailed { .. } => ErrorCode::CompressorPipelineStage,
            CompressorError::TaskJoinError(_) => ErrorCode::CompressorTaskJoin,
            CompressorError::ConfigurationError(_) => ErrorCode::ConfigurationError,
            _ => ErrorCode::CompressorError,
        }
    }

    /// 获取错误代码的数字值
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// 获取错误代码的描述
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::CompressorError => "Document compression failed",
            ErrorCode::CompressorOutputParsing => "Compressor could not parse model output",
            ErrorCode::CompressorReranker => "Reranker request failed",
            ErrorCode::CompressorPipelineStage => "Compressor pipeline stage failed",
            ErrorCode::CompressorTaskJoin => "Blocking compression task failed",
            ErrorCode::TransformerError => "Document transformation failed",
            ErrorCode::RetrieverError => "Retriever operation failed",
            ErrorCode::LLMError => "LLM operation failed",
            ErrorCode::EmbedderError => "Embedding failed",
            ErrorCode::TextSplitterError => "Text splitting failed",
            ErrorCode::ConfigurationError => "Configuration error",
            ErrorCode::JsonError => "JSON parsing/serialization failed",
            ErrorCode::UnknownError => "Unknown error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}: {}", self.as_u32(), self.description())
    }
}

/// 错误上下文信息
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// 操作名称
    pub operation: Option<String>,
    /// 模块名称
    pub module: Option<String>,
    /// 额外的上下文信息
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// 格式化上下文信息
    pub fn format(&self) -> String {
        let mut parts = Vec::new();

        if let Some(ref module) = self.module {
            parts.push(format!("module: {}", module));
        }

        if let Some(ref operation) = self.operation {
            parts.push(format!("operation: {}", operation));
        }

        if !self.metadata.is_empty() {
            let mut metadata_str: Vec<String> = self
                .metadata
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v))
                .collect();
            metadata_str.sort();
            parts.push(format!("metadata: {}", metadata_str.join(", ")));
        }

        if parts.is_empty() {
            "no context".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// 根据错误类型推断上下文；流水线错误会记录失败的阶段
pub fn error_context(error: &LangChainError) -> ErrorContext {
    let context = ErrorContext::new();

    match error {
        LangChainError::CompressorError(e) => {
            let context = context.with_module("document_compressors");
            match e {
                CompressorError::StageFailed { stage, .. } => {
                    context.with_metadata("stage", stage.to_string())
                }
                _ => context,
            }
        }
        LangChainError::TransformerError(_) => context.with_module("document_transformers"),
        LangChainError::RetrieverError(_) => context.with_module("retrievers"),
        LangChainError::LLMError(_) => context.with_module("language_models"),
        LangChainError::EmbedderError(_) => context.with_module("embedding"),
        LangChainError::TextSplitterError(_) => context.with_module("text_splitter"),
        _ => context,
    }
}

/// 获取错误的完整信息，包括错误代码和上下文
pub fn error_info(error: &LangChainError) -> String {
    let code = ErrorCode::from_error(error);
    let context = error_context(error);

    format!("[{}] {} [{}]", code, error, context.format())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        let display = format!("{}", ErrorCode::CompressorError);
        assert!(display.contains("E1000"));
        assert!(display.contains("Document compression failed"));
    }

    #[test]
    fn test_compressor_codes() {
        let error: LangChainError = CompressorError::StageFailed {
            stage: 3,
            source: Box::new(CompressorError::OtherError("x".to_string())),
        }
        .into();
        assert_eq!(
            ErrorCode::from_error(&error),
            ErrorCode::CompressorPipelineStage
        );

        let error: LangChainError = CompressorError::OtherError("x".to_string()).into();
        assert_eq!(ErrorCode::from_error(&error), ErrorCode::CompressorError);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new()
            .with_module("test")
            .with_operation("test_op")
            .with_metadata("key", "value");

        let formatted = context.format();
        assert!(formatted.contains("module: test"));
        assert!(formatted.contains("operation: test_op"));
        assert!(formatted.contains("key: value"));
    }

    #[test]
    fn test_error_info_includes_stage() {
        let error: LangChainError = CompressorError::StageFailed {
            stage: 2,
            source: Box::new(CompressorError::RerankerError("503".to_string())),
        }
        .into();
        let info = error_info(&error);
        assert!(info.contains("E1003"));
        assert!(info.contains("module: document_compressors"));
        assert!(info.contains("stage: 2"));
    }
}
