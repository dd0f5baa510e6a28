use async_trait::async_trait;

use super::{DocumentTransformer, TransformerError};
use crate::schemas::Document;
use crate::text_splitter::TextSplitter;

/// Runs a [`TextSplitter`] as a pipeline stage.
///
/// ```rust,ignore
/// let splitter = CharacterTextSplitter::new(
///     CharacterTextSplitterOptions::new().with_chunk_size(300).with_separator(". "),
/// );
/// let pipeline = DocumentCompressorPipeline::builder()
///     .transformer(TextSplitterTransformer::new(splitter))
///     .build();
/// ```
pub struct TextSplitterTransformer<S: TextSplitter> {
    splitter: S,
}

impl<S: TextSplitter> TextSplitterTransformer<S> {
    pub fn new(splitter: S) -> Self {
        Self { splitter }
    }

    pub fn splitter(&self) -> &S {
        &self.splitter
    }
}

#[async_trait]
impl<S: TextSplitter> DocumentTransformer for TextSplitterTransformer<S> {
    async fn transform_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, TransformerError> {
        Ok(self.splitter.split_documents(&documents).await?)
    }
}
