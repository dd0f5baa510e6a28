use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::PromptTemplate;
use super::{BooleanOutputParser, CompressorError, DocumentCompressor};
use crate::language_models::{llm::LLM, InvocationConfig};
use crate::schemas::Document;
use crate::utils::buffered_try_map;

pub const DEFAULT_FILTER_PROMPT: &str = "Given the following question and context, return YES if the context is relevant to the question and NO if it isn't.

> Question: {question}
> Context:
>>>
{context}
>>>
> Relevant (YES / NO):";

/// Configuration for LLM chain filter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMChainFilterConfig {
    /// Prompt with `{question}` and `{context}` placeholders
    pub prompt_template: Option<String>,
    /// Documents judged concurrently when the call carries no `max_concurrency`
    pub max_concurrency: usize,
}

impl Default for LLMChainFilterConfig {
    fn default() -> Self {
        Self {
            prompt_template: None,
            max_concurrency: 4,
        }
    }
}

impl LLMChainFilterConfig {
    pub fn with_prompt_template<S: Into<String>>(mut self, prompt_template: S) -> Self {
        self.prompt_template = Some(prompt_template.into());
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Drops documents an LLM judges irrelevant to the query.
///
/// Each document is shown to the model on its own; documents answered with
/// YES are kept unchanged, in their original order.
pub struct LLMChainFilter {
    llm: Arc<dyn LLM>,
    config: LLMChainFilterConfig,
    output_parser: BooleanOutputParser,
}

impl LLMChainFilter {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self::with_config(llm, LLMChainFilterConfig::default())
    }

    pub fn with_config(llm: Arc<dyn LLM>, config: LLMChainFilterConfig) -> Self {
        Self {
            llm,
            config,
            output_parser: BooleanOutputParser::default(),
        }
    }

    pub fn with_output_parser(mut self, output_parser: BooleanOutputParser) -> Self {
        self.output_parser = output_parser;
        self
    }
}

#[async_trait]
impl DocumentCompressor for LLMChainFilter {
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
        let total = documents.len();
        let concurrency = InvocationConfig::concurrency_or(config, self.config.max_concurrency);
        let template = PromptTemplate::new(
            self.config
                .prompt_template
                .as_deref()
                .unwrap_or(DEFAULT_FILTER_PROMPT),
        )?;
        let template = &template;

        let judged = buffered_try_map(documents, concurrency, |doc| async move {
            let prompt = template.format(query, &doc.page_content);
            let output = self.llm.invoke_with_config(&prompt, config).await?;
            let keep = self.output_parser.parse(&output)?;
            Ok::<_, CompressorError>((doc, keep))
        })
        .await?;

        let kept: Vec<Document> = judged
            .into_iter()
            .filter_map(|(doc, keep)| keep.then_some(doc))
            .collect();
        log::debug!("LLMChainFilter kept {} of {} documents", kept.len(), total);
        Ok(kept)
    }
}
