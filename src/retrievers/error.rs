use thiserror::Error;

use crate::document_compressors::CompressorError;

/// Errors specific to retrievers
#[derive(Error, Debug)]
pub enum RetrieverError {
    #[error("Query failed: {0}")]
    QueryError(String),

    #[error("Compression error: {0}")]
    CompressionError(#[from] CompressorError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn describe(error: &RetrieverError) -> &'static str {
        match error {
            RetrieverError::QueryError(_) => "query",
            RetrieverError::CompressionError(_) => "compression",
        }
    }

    #[test]
    fn test_compressor_errors_convert() {
        let error: RetrieverError = CompressorError::RerankerError("down".to_string()).into();
        assert_eq!(describe(&error), "compression");
        assert!(error.to_string().contains("down"));
        assert_eq!(
            describe(&RetrieverError::QueryError("timeout".to_string())),
            "query"
        );
    }
}
