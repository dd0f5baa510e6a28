use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::{CompressorError, DocumentCompressor};
use crate::schemas::Document;

pub const COHERE_API_BASE: &str = "https://api.cohere.ai";

/// Metadata key under which each reranked document records its relevance score.
pub const RELEVANCE_SCORE_KEY: &str = "relevance_score";

/// Configuration for Cohere rerank
#[derive(Debug)]
pub struct CohereRerankConfig {
    /// Cohere API key
    pub api_key: SecretString,
    /// Model to use for reranking
    pub model: String,
    /// Number of documents to return
    pub top_n: Option<usize>,
    /// API root, without the `/v1/rerank` path
    pub base_url: Url,
    /// HTTP client timeout
    pub timeout: Option<Duration>,
}

impl CohereRerankConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self, CompressorError> {
        Ok(Self {
            api_key: SecretString::from(api_key.into()),
            model: "rerank-english-v3.0".to_string(),
            top_n: Some(3),
            base_url: parse_base_url(COHERE_API_BASE)?,
            timeout: Some(Duration::from_secs(30)),
        })
    }

    /// Reads the key from the `COHERE_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, CompressorError> {
        let api_key = std::env::var("COHERE_API_KEY").map_err(|_| {
            CompressorError::ConfigurationError("COHERE_API_KEY is not set".to_string())
        })?;
        Self::new(api_key)
    }

    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, CompressorError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    fn rerank_endpoint(&self) -> String {
        format!("{}/v1/rerank", self.base_url.as_str().trim_end_matches('/'))
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, CompressorError> {
    Url::parse(base_url).map_err(|e| {
        CompressorError::ConfigurationError(format!("invalid base url {base_url}: {e}"))
    })
}

#[derive(Serialize)]
struct RerankRequest<'a> {
    model: &'a str,
    query: &'a str,
    documents: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_n: Option<usize>,
}

#[derive(Deserialize)]
struct RerankResponse {
    results: Vec<RerankResult>,
}

#[derive(Deserialize)]
struct RerankResult {
    index: usize,
    relevance_score: f64,
}

/// Compressor that reorders and truncates documents using the Cohere rerank API.
pub struct CohereRerank {
    config: CohereRerankConfig,
    client: Client,
}

impl CohereRerank {
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self, CompressorError> {
        Ok(Self::with_config(CohereRerankConfig::new(api_key)?))
    }

    pub fn with_config(config: CohereRerankConfig) -> Self {
        let mut client_builder = Client::builder();
        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder.build().unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    async fn rerank(
        &self,
        documents: &[Document],
        query: &str,
    ) -> Result<Vec<RerankResult>, CompressorError> {
        let request = RerankRequest {
            model: &self.config.model,
            query,
            documents: documents.iter().map(|d| d.page_content.as_str()).collect(),
            top_n: self.config.top_n,
        };

        let response = self
            .client
            .post(self.config.rerank_endpoint())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| CompressorError::RerankerError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(CompressorError::RerankerError(format!(
                "Cohere API error ({status}): {error_text}"
            )));
        }

        let rerank_response: RerankResponse = response
            .json()
            .await
            .map_err(|e| CompressorError::RerankerError(e.to_string()))?;
        Ok(rerank_response.results)
    }
}

#[async_trait]
impl DocumentCompressor for CohereRerank {
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        if documents.is_empty() {
            return Ok(documents);
        }

        let mut results = self.rerank(&documents, query).await?;
        results.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut slots: Vec<Option<Document>> = documents.into_iter().map(Some).collect();
        let mut reranked = Vec::with_capacity(results.len());
        for result in results {
            let Some(mut doc) = slots.get_mut(result.index).and_then(Option::take) else {
                log::warn!(
                    "Cohere returned unknown or duplicate document index {}",
                    result.index
                );
                continue;
            };
            doc.metadata.insert(
                RELEVANCE_SCORE_KEY.to_string(),
                Value::from(result.relevance_score),
            );
            doc.score = result.relevance_score;
            reranked.push(doc);
        }

        Ok(reranked)
    }
}
