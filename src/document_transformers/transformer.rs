use std::sync::Arc;

use async_trait::async_trait;

use super::TransformerError;
use crate::schemas::Document;

/// Transforms a list of documents without regard to any query.
#[async_trait]
pub trait DocumentTransformer: Send + Sync {
    async fn transform_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, TransformerError>;
}

#[async_trait]
impl<T> DocumentTransformer for Arc<T>
where
    T: DocumentTransformer + ?Sized,
{
    async fn transform_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, TransformerError> {
        self.as_ref().transform_documents(documents).await
    }
}

impl<T> From<T> for Box<dyn DocumentTransformer>
where
    T: DocumentTransformer + 'static,
{
    fn from(transformer: T) -> Self {
        Box::new(transformer)
    }
}
