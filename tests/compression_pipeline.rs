//! End-to-end compression: retrieve, split, deduplicate, judge, reorder.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use langchain_compressors::document_compressors::{
    BlockingCompressor, CompressorError, DocumentCompressor, DocumentCompressorPipeline,
    EmbeddingsFilter, LLMChainFilter, SyncDocumentCompressor,
};
use langchain_compressors::document_transformers::{
    EmbeddingsRedundantFilter, LongContextReorder, TextSplitterTransformer,
};
use langchain_compressors::embedding::{Embedder, EmbedderError};
use langchain_compressors::language_models::{
    llm::LLM, GenerateResult, InvocationConfig, LLMError,
};
use langchain_compressors::retrievers::{ContextualCompressionRetriever, RetrieverError};
use langchain_compressors::schemas::{Document, Message, Retriever};
use langchain_compressors::text_splitter::{CharacterTextSplitter, CharacterTextSplitterOptions};

const VOCABULARY: [&str; 4] = ["rust", "borrow", "python", "garbage"];

/// Bag-of-words embedding over a tiny fixed vocabulary.
struct VocabularyEmbedder;

fn embed(text: &str) -> Vec<f64> {
    let lower = text.to_lowercase();
    VOCABULARY
        .iter()
        .map(|w| lower.matches(w).count() as f64)
        .collect()
}

#[async_trait]
impl Embedder for VocabularyEmbedder {
    async fn embed_documents(&self, documents: &[String]) -> Result<Vec<Vec<f64>>, EmbedderError> {
        Ok(documents.iter().map(|d| embed(d)).collect())
    }

    async fn embed_query(&self, text: &str) -> Result<Vec<f64>, EmbedderError> {
        Ok(embed(text))
    }
}

/// Says YES when the context mentions the borrow checker.
#[derive(Default)]
struct BorrowJudge {
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

#[async_trait]
impl LLM for BorrowJudge {
    async fn generate(&self, messages: &[Message]) -> Result<GenerateResult, LLMError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(5)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        let prompt = messages
            .last()
            .map(|m| m.content.to_lowercase())
            .unwrap_or_default();
        let context = prompt.split(">>>").nth(1).unwrap_or_default();
        Ok(GenerateResult {
            tokens: None,
            generation: if context.contains("borrow") { "YES" } else { "NO" }.to_string(),
        })
    }
}

struct CorpusRetriever;

#[async_trait]
impl Retriever for CorpusRetriever {
    async fn get_relevant_documents(&self, _query: &str) -> Result<Vec<Document>, RetrieverError> {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), json!("handbook"));
        Ok(vec![
            Document::new(
                "Rust has a borrow checker|Rust has a borrow checker|Python uses garbage collection",
            )
            .with_metadata(metadata),
            Document::new("Borrowing is checked at compile time"),
        ])
    }
}

/// Keeps at most `limit` documents.
struct Take(usize);

impl SyncDocumentCompressor for Take {
    fn compress_documents_sync(
        &self,
        mut documents: Vec<Document>,
        _query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        documents.truncate(self.0);
        Ok(documents)
    }
}

fn pipeline(judge: Arc<BorrowJudge>) -> DocumentCompressorPipeline {
    let embedder = Arc::new(VocabularyEmbedder);
    let splitter = CharacterTextSplitter::new(
        CharacterTextSplitterOptions::new()
            .with_chunk_size(40)
            .with_chunk_overlap(0)
            .with_separator("|"),
    );

    DocumentCompressorPipeline::builder()
        .transformer(TextSplitterTransformer::new(splitter))
        .transformer(EmbeddingsRedundantFilter::new(embedder.clone()))
        .compressor(EmbeddingsFilter::with_threshold(embedder, 0.1).unwrap())
        .compressor(LLMChainFilter::new(judge))
        .compressor(BlockingCompressor::new(Take(5)))
        .transformer(LongContextReorder)
        .build()
}

#[tokio::test]
async fn test_full_pipeline_through_retriever() {
    let _ = env_logger::builder().is_test(true).try_init();

    let judge = Arc::new(BorrowJudge::default());
    let retriever = ContextualCompressionRetriever::new(
        Arc::new(CorpusRetriever),
        Arc::new(pipeline(judge.clone())),
    );

    let config = InvocationConfig::new().with_max_concurrency(1);
    let docs = retriever
        .get_relevant_documents_with_config("rust borrow", Some(&config))
        .await
        .unwrap();

    let contents: Vec<&str> = docs.iter().map(|d| d.page_content.as_str()).collect();
    assert_eq!(
        contents,
        vec!["Borrowing is checked at compile time", "Rust has a borrow checker"]
    );
    assert_eq!(docs[1].metadata.get("source"), Some(&json!("handbook")));
    assert!(docs[1].metadata.contains_key("query_similarity_score"));
    // The duplicate chunk and the python chunk never reach the LLM.
    assert_eq!(judge.calls.load(Ordering::SeqCst), 2);
    assert_eq!(judge.peak.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_llm_calls_overlap_without_a_limit() {
    let judge = Arc::new(BorrowJudge::default());
    let retriever = ContextualCompressionRetriever::new(
        Arc::new(CorpusRetriever),
        Arc::new(pipeline(judge.clone())),
    );

    let docs = retriever.get_relevant_documents("rust borrow").await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(judge.peak.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_stage_error_reports_position() {
    let failing_embedder_pipeline = DocumentCompressorPipeline::builder()
        .transformer(LongContextReorder)
        .compressor(EmbeddingsFilter::with_threshold(Arc::new(BrokenEmbedder), 0.5).unwrap())
        .build();

    let err = failing_embedder_pipeline
        .compress_documents(vec![Document::new("x")], "x")
        .await
        .unwrap_err();

    match err {
        CompressorError::StageFailed { stage, source } => {
            assert_eq!(stage, 1);
            assert!(matches!(*source, CompressorError::EmbedderError(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

struct BrokenEmbedder;

#[async_trait]
impl Embedder for BrokenEmbedder {
    async fn embed_documents(&self, _documents: &[String]) -> Result<Vec<Vec<f64>>, EmbedderError> {
        Err(EmbedderError::OtherError("offline".to_string()))
    }

    async fn embed_query(&self, _text: &str) -> Result<Vec<f64>, EmbedderError> {
        Err(EmbedderError::OtherError("offline".to_string()))
    }
}
