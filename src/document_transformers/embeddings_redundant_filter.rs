use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{DocumentTransformer, TransformerError};
use crate::embedding::{Embedder, EmbedderError};
use crate::schemas::Document;
use crate::utils::cosine_similarity_f64;

/// Configuration for embeddings redundant filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingsRedundantFilterConfig {
    /// Documents more similar than this to an already kept document are dropped
    pub similarity_threshold: f64,
    /// Maximum number of documents to return
    pub max_docs: Option<usize>,
}

impl Default for EmbeddingsRedundantFilterConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.95,
            max_docs: None,
        }
    }
}

impl EmbeddingsRedundantFilterConfig {
    pub fn with_similarity_threshold(mut self, similarity_threshold: f64) -> Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    pub fn with_max_docs(mut self, max_docs: usize) -> Self {
        self.max_docs = Some(max_docs);
        self
    }
}

/// Removes near-duplicate documents by comparing their embeddings.
///
/// Documents are visited in order; a document is kept unless its cosine
/// similarity to some already kept document exceeds the threshold.
pub struct EmbeddingsRedundantFilter {
    embedder: Arc<dyn Embedder>,
    config: EmbeddingsRedundantFilterConfig,
}

impl EmbeddingsRedundantFilter {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_config(embedder, EmbeddingsRedundantFilterConfig::default())
    }

    pub fn with_config(
        embedder: Arc<dyn Embedder>,
        config: EmbeddingsRedundantFilterConfig,
    ) -> Self {
        Self { embedder, config }
    }

    /// Indices of the documents that survive, in input order.
    fn non_redundant_indices(&self, embeddings: &[Vec<f64>]) -> Vec<usize> {
        let mut kept: Vec<usize> = Vec::new();

        for (i, embedding) in embeddings.iter().enumerate() {
            let is_redundant = kept.iter().any(|&k| {
                cosine_similarity_f64(embedding, &embeddings[k]) > self.config.similarity_threshold
            });
            if !is_redundant {
                kept.push(i);
            }
        }

        kept
    }
}

#[async_trait]
impl DocumentTransformer for EmbeddingsRedundantFilter {
    async fn transform_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, TransformerError> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let texts: Vec<String> = documents.iter().map(|d| d.page_content.clone()).collect();
        let embeddings = self.embedder.embed_documents(&texts).await?;
        if embeddings.len() != documents.len() {
            return Err(EmbedderError::CountMismatch {
                expected: documents.len(),
                actual: embeddings.len(),
            }
            .into());
        }

        let kept = self.non_redundant_indices(&embeddings);
        log::debug!(
            "EmbeddingsRedundantFilter kept {} of {} documents",
            kept.len(),
            documents.len()
        );

        let mut slots: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
        let mut filtered: Vec<Document> = kept
            .into_iter()
            .filter_map(|i| slots[i].take())
            .collect();

        if let Some(max) = self.config.max_docs {
            filtered.truncate(max);
        }

        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct LookupEmbedder {
        vectors: HashMap<String, Vec<f64>>,
        calls: AtomicUsize,
    }

    impl LookupEmbedder {
        fn new(entries: &[(&str, Vec<f64>)]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Embedder for LookupEmbedder {
        async fn embed_documents(
            &self,
            documents: &[String],
        ) -> Result<Vec<Vec<f64>>, EmbedderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            documents
                .iter()
                .map(|d| {
                    self.vectors
                        .get(d)
                        .cloned()
                        .ok_or_else(|| EmbedderError::OtherError(format!("unknown text {d}")))
                })
                .collect()
        }

        async fn embed_query(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
            Ok(self.vectors.get(text).cloned().unwrap_or_default())
        }
    }

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts.iter().map(|t| Document::new(*t)).collect()
    }

    #[tokio::test]
    async fn test_drops_near_duplicates_keeping_first() {
        let embedder = Arc::new(LookupEmbedder::new(&[
            ("cats", vec![1.0, 0.0]),
            ("kittens", vec![0.99, 0.01]),
            ("cars", vec![0.0, 1.0]),
        ]));
        let filter = EmbeddingsRedundantFilter::new(embedder);

        let result = filter
            .transform_documents(docs(&["cats", "kittens", "cars"]))
            .await
            .unwrap();

        let contents: Vec<&str> = result.iter().map(|d| d.page_content.as_str()).collect();
        assert_eq!(contents, vec!["cats", "cars"]);
    }

    #[tokio::test]
    async fn test_threshold_is_strict() {
        let embedder = Arc::new(LookupEmbedder::new(&[
            ("a", vec![1.0, 0.0]),
            ("b", vec![1.0, 0.0]),
        ]));
        let filter = EmbeddingsRedundantFilter::with_config(
            embedder,
            EmbeddingsRedundantFilterConfig::default().with_similarity_threshold(1.0),
        );

        let result = filter.transform_documents(docs(&["a", "b"])).await.unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_max_docs() {
        let embedder = Arc::new(LookupEmbedder::new(&[
            ("x", vec![1.0, 0.0, 0.0]),
            ("y", vec![0.0, 1.0, 0.0]),
            ("z", vec![0.0, 0.0, 1.0]),
        ]));
        let filter = EmbeddingsRedundantFilter::with_config(
            embedder,
            EmbeddingsRedundantFilterConfig::default().with_max_docs(2),
        );

        let result = filter
            .transform_documents(docs(&["x", "y", "z"]))
            .await
            .unwrap();
        assert_eq!(result.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_input_skips_embedder() {
        let embedder = Arc::new(LookupEmbedder::new(&[]));
        let filter = EmbeddingsRedundantFilter::new(embedder.clone());

        let result = filter.transform_documents(vec![]).await.unwrap();

        assert!(result.is_empty());
        assert_eq!(embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_embedder_error_propagates() {
        let embedder = Arc::new(LookupEmbedder::new(&[]));
        let filter = EmbeddingsRedundantFilter::new(embedder);

        let result = filter.transform_documents(docs(&["missing"])).await;
        assert!(matches!(result, Err(TransformerError::EmbedderError(_))));
    }
}
