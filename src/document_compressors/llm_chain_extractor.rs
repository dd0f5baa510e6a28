use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::prompt::PromptTemplate;
use super::{CompressorError, DocumentCompressor, NoOutputParser, NO_OUTPUT_STR};
use crate::language_models::{llm::LLM, InvocationConfig};
use crate::schemas::Document;
use crate::utils::buffered_try_map;

fn default_extract_prompt(no_output_str: &str) -> String {
    format!(
        "Given the following question and context, extract any part of the context *AS IS* that is relevant to answer the question. If none of the context is relevant return {no_output_str}.

Remember, *DO NOT* edit the extracted parts of the context.

> Question: {{question}}
> Context:
>>>
{{context}}
>>>
Extracted relevant parts:"
    )
}

/// Configuration for LLM chain extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMChainExtractorConfig {
    /// Prompt with `{question}` and `{context}` placeholders
    pub prompt_template: Option<String>,
    /// What the model answers when nothing is relevant
    pub no_output_str: String,
    /// Documents processed concurrently when the call carries no `max_concurrency`
    pub max_concurrency: usize,
}

impl Default for LLMChainExtractorConfig {
    fn default() -> Self {
        Self {
            prompt_template: None,
            no_output_str: NO_OUTPUT_STR.to_string(),
            max_concurrency: 4,
        }
    }
}

impl LLMChainExtractorConfig {
    pub fn with_prompt_template<S: Into<String>>(mut self, prompt_template: S) -> Self {
        self.prompt_template = Some(prompt_template.into());
        self
    }

    pub fn with_no_output_str<S: Into<String>>(mut self, no_output_str: S) -> Self {
        self.no_output_str = no_output_str.into();
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Rewrites each document down to the passages an LLM considers relevant.
///
/// Documents for which the model finds nothing relevant are dropped. Kept
/// documents carry the extracted text and the original metadata.
pub struct LLMChainExtractor {
    llm: Arc<dyn LLM>,
    prompt_template: String,
    output_parser: NoOutputParser,
    max_concurrency: usize,
}

impl LLMChainExtractor {
    pub fn new(llm: Arc<dyn LLM>) -> Self {
        Self::with_config(llm, LLMChainExtractorConfig::default())
    }

    pub fn with_config(llm: Arc<dyn LLM>, config: LLMChainExtractorConfig) -> Self {
        let prompt_template = config
            .prompt_template
            .unwrap_or_else(|| default_extract_prompt(&config.no_output_str));
        Self {
            llm,
            prompt_template,
            output_parser: NoOutputParser::new(config.no_output_str),
            max_concurrency: config.max_concurrency,
        }
    }
}

#[async_trait]
impl DocumentCompressor for LLMChainExtractor {
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
        let concurrency = InvocationConfig::concurrency_or(config, self.max_concurrency);
        let template = PromptTemplate::new(self.prompt_template.as_str())?;
        let template = &template;

        let extracted = buffered_try_map(documents, concurrency, |mut doc| async move {
            let prompt = template.format(query, &doc.page_content);
            let output = self.llm.invoke_with_config(&prompt, config).await?;
            let output = self.output_parser.parse(&output);
            if output.is_empty() {
                return Ok::<_, CompressorError>(None);
            }
            doc.page_content = output;
            Ok(Some(doc))
        })
        .await?;

        let compressed: Vec<Document> = extracted.into_iter().flatten().collect();
        log::debug!(
            "LLMChainExtractor extracted content from {} of {} documents",
            compressed.len(),
            total
        );
        Ok(compressed)
    }
}
