use std::sync::Arc;

use async_trait::async_trait;

use super::CompressorError;
use crate::language_models::InvocationConfig;
use crate::schemas::Document;

/// Compresses retrieved documents given the query that retrieved them.
#[async_trait]
pub trait DocumentCompressor: Send + Sync {
    /// Compress retrieved documents given the query context.
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError>;

    /// Compress with an optional per-call configuration.
    ///
    /// The default implementation ignores the config and calls
    /// `compress_documents()`. Compressors that use run names, tags or
    /// concurrency limits override this.
    async fn compress_documents_with_config(
        &self,
        documents: Vec<Document>,
        query: &str,
        _config: Option<&InvocationConfig>,
    ) -> Result<Vec<Document>, CompressorError> {
        self.compress_documents(documents, query).await
    }
}

#[async_trait]
impl<T> DocumentCompressor for Arc<T>
where
    T: DocumentCompressor + ?Sized,
{
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        self.as_ref().compress_documents(documents, query).await
    }

    async fn compress_documents_with_config(
        &self,
        documents: Vec<Document>,
        query: &str,
        config: Option<&InvocationConfig>,
    ) -> Result<Vec<Document>, CompressorError> {
        self.as_ref()
            .compress_documents_with_config(documents, query, config)
            .await
    }
}

impl<C> From<C> for Box<dyn DocumentCompressor>
where
    C: DocumentCompressor + 'static,
{
    fn from(compressor: C) -> Self {
        Box::new(compressor)
    }
}
