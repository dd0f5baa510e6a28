use regex::{Captures, Regex};

use super::CompressorError;

/// Fills the `{question}` and `{context}` placeholders of a prompt template.
///
/// Substitution is a single pass over the template, so placeholder text inside
/// the question or the document is left as is.
#[derive(Debug, Clone)]
pub(crate) struct PromptTemplate {
    template: String,
    placeholders: Regex,
}

impl PromptTemplate {
    pub(crate) fn new<S: Into<String>>(template: S) -> Result<Self, CompressorError> {
        let placeholders = Regex::new(r"\{(question|context)\}")
            .map_err(|e| CompressorError::ConfigurationError(e.to_string()))?;
        Ok(Self {
            template: template.into(),
            placeholders,
        })
    }

    pub(crate) fn format(&self, question: &str, context: &str) -> String {
        self.placeholders
            .replace_all(&self.template, |caps: &Captures| match &caps[1] {
                "question" => question.to_string(),
                _ => context.to_string(),
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_fills_both_placeholders() {
        let template = PromptTemplate::new("Q: {question}\nC: {context}\nQ again: {question}").unwrap();
        assert_eq!(
            template.format("why", "because"),
            "Q: why\nC: because\nQ again: why"
        );
    }

    #[test]
    fn test_values_are_not_substituted_again() {
        let template = PromptTemplate::new("Q: {question}\nC: {context}").unwrap();
        assert_eq!(
            template.format("what does {context} mean?", "doc says {question}"),
            "Q: what does {context} mean?\nC: doc says {question}"
        );
    }

    #[test]
    fn test_other_braces_untouched() {
        let template = PromptTemplate::new("{\"json\": {context}}").unwrap();
        assert_eq!(template.format("q", "1"), "{\"json\": 1}");
    }
}
