use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::TextSplitterError;
use crate::schemas::Document;

/// Splits text into chunks. Every splitter gets document-level helpers for free.
#[async_trait]
pub trait TextSplitter: Send + Sync {
    async fn split_text(&self, text: &str) -> Result<Vec<String>, TextSplitterError>;

    /// Split each document and copy its metadata onto every chunk.
    async fn split_documents(
        &self,
        documents: &[Document],
    ) -> Result<Vec<Document>, TextSplitterError> {
        let mut texts: Vec<String> = Vec::with_capacity(documents.len());
        let mut metadatas: Vec<HashMap<String, Value>> = Vec::with_capacity(documents.len());
        documents.iter().for_each(|d| {
            texts.push(d.page_content.clone());
            metadatas.push(d.metadata.clone());
        });

        self.create_documents(&texts, &metadatas).await
    }

    /// Build chunk documents from raw texts. `metadatas` is either empty or
    /// one map per text.
    async fn create_documents(
        &self,
        text: &[String],
        metadatas: &[HashMap<String, Value>],
    ) -> Result<Vec<Document>, TextSplitterError> {
        if !metadatas.is_empty() && text.len() != metadatas.len() {
            return Err(TextSplitterError::MetadataTextMismatch {
                texts: text.len(),
                metadatas: metadatas.len(),
            });
        }

        let mut documents: Vec<Document> = Vec::new();
        for (i, text) in text.iter().enumerate() {
            let metadata = metadatas.get(i).cloned().unwrap_or_default();
            for chunk in self.split_text(text).await? {
                documents.push(Document::new(chunk).with_metadata(metadata.clone()));
            }
        }

        Ok(documents)
    }
}
