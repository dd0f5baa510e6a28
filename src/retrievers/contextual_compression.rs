use std::sync::Arc;

use async_trait::async_trait;

use crate::document_compressors::DocumentCompressor;
use crate::language_models::InvocationConfig;
use crate::retrievers::RetrieverError;
use crate::schemas::{Document, Retriever};

/// Retriever that compresses the output of a base retriever.
///
/// # Example
///
/// ```rust,ignore
/// let retriever = ContextualCompressionRetriever::new(
///     Arc::new(vector_store_retriever),
///     Arc::new(LLMChainExtractor::new(llm)),
/// );
/// let docs = retriever.get_relevant_documents("what did the president say?").await?;
/// ```
pub struct ContextualCompressionRetriever {
    base_retriever: Arc<dyn Retriever>,
    base_compressor: Arc<dyn DocumentCompressor>,
}

impl ContextualCompressionRetriever {
    pub fn new(
        base_retriever: Arc<dyn Retriever>,
        base_compressor: Arc<dyn DocumentCompressor>,
    ) -> Self {
        Self {
            base_retriever,
            base_compressor,
        }
    }

    /// Retrieve, then compress with an optional per-call configuration.
    ///
    /// The compressor is not invoked when the base retriever returns nothing.
    pub async fn get_relevant_documents_with_config(
        &self,
        query: &str,
        config: Option<&InvocationConfig>,
    ) -> Result<Vec<Document>, RetrieverError> {
        let documents = self.base_retriever.get_relevant_documents(query).await?;
        if documents.is_empty() {
            return Ok(documents);
        }

        let retrieved = documents.len();
        let compressed = self
            .base_compressor
            .compress_documents_with_config(documents, query, config)
            .await?;
        log::debug!(
            "compressed {} retrieved documents down to {}",
            retrieved,
            compressed.len()
        );
        Ok(compressed)
    }
}

#[async_trait]
impl Retriever for ContextualCompressionRetriever {
    async fn get_relevant_documents(&self, query: &str) -> Result<Vec<Document>, RetrieverError> {
        self.get_relevant_documents_with_config(query, None).await
    }
}
