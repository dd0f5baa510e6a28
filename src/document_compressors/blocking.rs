use std::sync::Arc;

use async_trait::async_trait;

use super::{CompressorError, DocumentCompressor};
use crate::schemas::Document;

/// A compressor whose work is synchronous, typically CPU-bound scoring.
pub trait SyncDocumentCompressor: Send + Sync + 'static {
    fn compress_documents_sync(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError>;
}

/// Adapts a [`SyncDocumentCompressor`] to the async [`DocumentCompressor`]
/// trait by running it on Tokio's blocking thread pool.
///
/// # Example
///
/// ```rust,ignore
/// struct KeywordFilter;
///
/// impl SyncDocumentCompressor for KeywordFilter {
///     fn compress_documents_sync(
///         &self,
///         documents: Vec<Document>,
///         query: &str,
///     ) -> Result<Vec<Document>, CompressorError> {
///         Ok(documents.into_iter().filter(|d| d.page_content.contains(query)).collect())
///     }
/// }
///
/// let compressor = BlockingCompressor::new(KeywordFilter);
/// let docs = compressor.compress_documents(docs, "rust").await?;
/// ```
pub struct BlockingCompressor<C: SyncDocumentCompressor> {
    inner: Arc<C>,
}

impl<C: SyncDocumentCompressor> BlockingCompressor<C> {
    pub fn new(compressor: C) -> Self {
        Self {
            inner: Arc::new(compressor),
        }
    }

    pub fn from_arc(compressor: Arc<C>) -> Self {
        Self { inner: compressor }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Run the wrapped compressor on the calling thread.
    pub fn compress_documents_blocking(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        self.inner.compress_documents_sync(documents, query)
    }
}

impl<C: SyncDocumentCompressor> Clone for BlockingCompressor<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl<C: SyncDocumentCompressor> DocumentCompressor for BlockingCompressor<C> {
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        tokio::task::spawn_blocking(move || inner.compress_documents_sync(documents, &query))
            .await?
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread::{self, ThreadId};

    use super::*;

    #[derive(Default)]
    struct KeywordFilter {
        seen_on: Mutex<Option<ThreadId>>,
    }

    impl SyncDocumentCompressor for KeywordFilter {
        fn compress_documents_sync(
            &self,
            documents: Vec<Document>,
            query: &str,
        ) -> Result<Vec<Document>, CompressorError> {
            if let Ok(mut seen) = self.seen_on.lock() {
                *seen = Some(thread::current().id());
            }
            Ok(documents
                .into_iter()
                .filter(|d| d.page_content.contains(query))
                .collect())
        }
    }

    struct Panicking;

    impl SyncDocumentCompressor for Panicking {
        fn compress_documents_sync(
            &self,
            _documents: Vec<Document>,
            _query: &str,
        ) -> Result<Vec<Document>, CompressorError> {
            panic!("compressor exploded");
        }
    }

    fn docs() -> Vec<Document> {
        vec![
            Document::new("rust ownership"),
            Document::new("python gil"),
            Document::new("rust traits"),
        ]
    }

    #[tokio::test]
    async fn test_async_matches_sync() {
        let compressor = BlockingCompressor::new(KeywordFilter::default());

        let sync_result = compressor
            .compress_documents_blocking(docs(), "rust")
            .unwrap();
        let async_result = compressor.compress_documents(docs(), "rust").await.unwrap();

        assert_eq!(sync_result, async_result);
        assert_eq!(async_result.len(), 2);
    }

    #[tokio::test]
    async fn test_runs_off_the_calling_thread() {
        let compressor = BlockingCompressor::new(KeywordFilter::default());
        compressor.compress_documents(docs(), "rust").await.unwrap();

        let seen = *compressor.inner().seen_on.lock().unwrap();
        assert!(seen.is_some());
        assert_ne!(seen, Some(thread::current().id()));
    }

    #[tokio::test]
    async fn test_panic_surfaces_as_join_error() {
        let compressor = BlockingCompressor::new(Panicking);
        let result = compressor.compress_documents(docs(), "rust").await;
        assert!(matches!(result, Err(CompressorError::TaskJoinError(_))));
    }
}
