use async_trait::async_trait;

use crate::schemas::Message;

use super::{invocation_config::InvocationConfig, GenerateResult, LLMError};

/// A chat model used by the LLM-backed compressors.
///
/// Provider clients live outside this crate; anything that can turn a list of
/// messages into a completion can implement this trait.
#[async_trait]
pub trait LLM: Sync + Send {
    async fn generate(&self, messages: &[Message]) -> Result<GenerateResult, LLMError>;

    async fn invoke(&self, prompt: &str) -> Result<String, LLMError> {
        self.generate(&[Message::new_human_message(prompt)])
            .await
            .map(|res| res.generation)
    }

    /// Invoke the model with a prompt and optional invocation config.
    ///
    /// The default implementation ignores the config and calls `invoke()`.
    async fn invoke_with_config(
        &self,
        prompt: &str,
        _config: Option<&InvocationConfig>,
    ) -> Result<String, LLMError> {
        self.invoke(prompt).await
    }
}

impl<L> From<L> for Box<dyn LLM>
where
    L: 'static + LLM,
{
    fn from(llm: L) -> Self {
        Box::new(llm)
    }
}
