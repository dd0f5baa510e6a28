use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::runtime::Handle;

use super::{CompressorError, DocumentCompressor};
use crate::document_transformers::DocumentTransformer;
use crate::language_models::InvocationConfig;
use crate::schemas::Document;

/// One step of a [`DocumentCompressorPipeline`].
#[derive(Clone)]
pub enum PipelineStage {
    /// Query-aware stage.
    Compressor(Arc<dyn DocumentCompressor>),
    /// Query-agnostic stage.
    Transformer(Arc<dyn DocumentTransformer>),
}

impl PipelineStage {
    pub fn compressor<C: DocumentCompressor + 'static>(compressor: C) -> Self {
        Self::Compressor(Arc::new(compressor))
    }

    pub fn transformer<T: DocumentTransformer + 'static>(transformer: T) -> Self {
        Self::Transformer(Arc::new(transformer))
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Compressor(_) => "compressor",
            Self::Transformer(_) => "transformer",
        }
    }

    async fn run(
        &self,
        documents: Vec<Document>,
        query: &str,
        config: Option<&InvocationConfig>,
    ) -> Result<Vec<Document>, CompressorError> {
        match self {
            Self::Compressor(compressor) => {
                compressor
                    .compress_documents_with_config(documents, query, config)
                    .await
            }
            Self::Transformer(transformer) => Ok(transformer.transform_documents(documents).await?),
        }
    }
}

impl fmt::Debug for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PipelineStage::{}", self.kind())
    }
}

/// Document compressor that runs a sequence of compressors and transformers,
/// feeding each stage the output of the previous one.
///
/// Compressor stages receive the query; transformer stages only see the
/// documents. The pipeline is itself a [`DocumentCompressor`], so pipelines
/// nest. An empty pipeline returns its input unchanged.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = DocumentCompressorPipeline::builder()
///     .transformer(TextSplitterTransformer::new(splitter))
///     .transformer(EmbeddingsRedundantFilter::new(embedder.clone()))
///     .compressor(EmbeddingsFilter::with_threshold(embedder, 0.76)?)
///     .build();
///
/// let compressed = pipeline.compress_documents(docs, "what is ownership?").await?;
/// ```
#[derive(Clone, Default, Debug)]
pub struct DocumentCompressorPipeline {
    transformers: Vec<PipelineStage>,
}

impl DocumentCompressorPipeline {
    pub fn new(stages: Vec<PipelineStage>) -> Self {
        Self {
            transformers: stages,
        }
    }

    pub fn builder() -> DocumentCompressorPipelineBuilder {
        DocumentCompressorPipelineBuilder::new()
    }

    pub fn push_compressor<C: DocumentCompressor + 'static>(&mut self, compressor: C) {
        self.transformers.push(PipelineStage::compressor(compressor));
    }

    pub fn push_transformer<T: DocumentTransformer + 'static>(&mut self, transformer: T) {
        self.transformers.push(PipelineStage::transformer(transformer));
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.transformers
    }

    pub fn len(&self) -> usize {
        self.transformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transformers.is_empty()
    }

    /// Drive the pipeline to completion from synchronous code.
    ///
    /// Must not be called from within an async context: `Handle::block_on`
    /// panics when the current thread is already driving a runtime.
    pub fn compress_documents_blocking(
        &self,
        handle: &Handle,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        handle.block_on(self.compress_documents(documents, query))
    }
}

#[async_trait]
impl DocumentCompressor for DocumentCompressorPipeline {
    async fn compress_documents(
        &self,
        documents: Vec<Document>,
        query: &str,
    ) -> Result<Vec<Document>, CompressorError> {
        self.compress_documents_with_config(documents, query, None)
            .await
    }

    async fn compress_documents_with_config(
        &self,
        documents: Vec<Document>,
        query: &str,
        config: Option<&InvocationConfig>,
    ) -> Result<Vec<Document>, CompressorError> {
        let mut documents = documents;
        for (stage, transformer) in self.transformers.iter().enumerate() {
            let before = documents.len();
            documents = transformer
                .run(documents, query, config)
                .await
                .map_err(|e| CompressorError::StageFailed {
                    stage,
                    source: Box::new(e),
                })?;
            log::debug!(
                "pipeline stage {} ({}): {} -> {} documents",
                stage,
                transformer.kind(),
                before,
                documents.len()
            );
        }
        Ok(documents)
    }
}

/// Builder for [`DocumentCompressorPipeline`].
#[derive(Default)]
pub struct DocumentCompressorPipelineBuilder {
    stages: Vec<PipelineStage>,
}

impl DocumentCompressorPipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compressor<C: DocumentCompressor + 'static>(mut self, compressor: C) -> Self {
        self.stages.push(PipelineStage::compressor(compressor));
        self
    }

    pub fn transformer<T: DocumentTransformer + 'static>(mut self, transformer: T) -> Self {
        self.stages.push(PipelineStage::transformer(transformer));
        self
    }

    pub fn stage(mut self, stage: PipelineStage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn build(self) -> DocumentCompressorPipeline {
        DocumentCompressorPipeline::new(self.stages)
    }
}
