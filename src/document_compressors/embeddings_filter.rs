use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{CompressorError, DocumentCompressor};
use crate::embedding::{Embedder, EmbedderError};
use crate::schemas::Document;
use crate::utils::{batch_cosine_similarity_f64, top_k_indices};

/// Metadata key under which each kept document records its similarity to the query.
pub const QUERY_SIMILARITY_SCORE_KEY: &str = "query_similarity_score";

/// Configuration for embeddings filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsFilterConfig {
    /// Number of most similar documents to keep
    pub k: Option<usize>,
    /// Minimum (exclusive) similarity to the query a document needs to be kept
    pub similarity_threshold: Option<f64>,
}

impl Default for EmbeddingsFilterConfig {
    fn default() -> Self {
        Self {
            k: Some(20),
            similarity_threshold: None,
        }
    }
}

impl EmbeddingsFilterConfig {
    pub fn with_k(mut self, k: Option<usize>) -> Self {
        self.k = k;
        self
    }

    pub fn with_similarity_threshold(mut self, similarity_threshold: Option<f64>) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    fn validate(&self) -> Result<(), CompressorError> {
        if self.k.is_none() && self.similarity_threshold.is_none() {
            return Err(CompressorError::ConfigurationError(
                "Must specify one of `k` or `similarity_threshold`.".to_string(),
            ));
        }
        Ok(())
    }
}

/// Keeps the documents whose embeddings are most similar to the query.
pub struct EmbeddingsFilter {
    embedder: Arc<dyn Embedder>,
    config: EmbeddingsFilterConfig,
}

impl EmbeddingsFilter {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            config: EmbeddingsFilterConfig::default(),
        }
    }

    pub fn with_config(
        embedder: Arc<dyn Embedder>,
        config: EmbeddingsFilterConfig,
    ) -> Result<Self, CompressorError> {
        config.validate()?;
        Ok(Self { embedder, config })
    }

    /// Filter on similarity threshold only, without a top-k cut.
    pub fn with_threshold(
        embedder: Arc<dyn Embedder>,
        similarity_threshold: f64,
    ) -> Result<Self, CompressorError> {
        Self::with_config(
            embedder,
            EmbeddingsFilterConfig::default()
                .with_k(None)
                .with_similarity_threshold(Some(similarity_threshold)),
        )
    }

    pub fn config(&self) -> &EmbeddingsFilterConfig {
        &self.config
    }

    fn select(&self, similarity: &[f64]) -> Vec<usize> {
        let mut included: Vec<usize> = match self.config.k {
            Some(k) => top_k_indices(similarity, k),
            None => (0..similarity.len()).collect(),
        };
        if let Some(threshold) = self.config.similarity_threshold {
            included.retain(|&i| similarity[i] > threshold);
        }
        included
    }
}

#[async_trait]
impl DocumentCompressor for EmbeddingsFilter {
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let embedded_documents = self.embedder.embed_documents(&texts).await?;
        if embedded_documents.len() != documents.len() {
            return Err(EmbedderError::CountMismatch {
                expected: documents.len(),
                actual: embedded_documents.len(),
            }
            .into());
        }
        let embedded_query = self.embedder.embed_query(query).await?;

        let similarity = batch_cosine_similarity_f64(&embedded_query, &embedded_documents);
        let included = self.select(&similarity);

        let mut slots: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
        Ok(included
            .into_iter()
            .filter_map(|i| {
                slots[i].take().map(|mut doc| {
                    doc.metadata.insert(
                        QUERY_SIMILARITY_SCORE_KEY.to_string(),
                        Value::from(similarity[i]),
                    );
                    doc
                })
            })
            .collect())
    }
}
