use text_splitter::ChunkConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextSplitterError {
    #[error("Got {texts} texts but {metadatas} metadata maps")]
    MetadataTextMismatch { texts: usize, metadatas: usize },

    #[error("Unknown token encoding: {0}")]
    UnknownEncoding(String),

    #[error("Could not load tokenizer for {0}")]
    TokenizerUnavailable(String),

    #[error("Invalid splitter options: {0}")]
    InvalidSplitterOptions(String),
}

impl From<ChunkConfigError> for TextSplitterError {
    fn from(e: ChunkConfigError) -> Self {
        Self::InvalidSplitterOptions(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_details() {
        let errors = [
            TextSplitterError::MetadataTextMismatch {
                texts: 2,
                metadatas: 1,
            },
            TextSplitterError::UnknownEncoding("o9k".to_string()),
            TextSplitterError::TokenizerUnavailable("model x".to_string()),
            TextSplitterError::InvalidSplitterOptions("overlap".to_string()),
        ];
        let messages: Vec<String> = errors
            .iter()
            .map(|e| match e {
                TextSplitterError::MetadataTextMismatch { .. }
                | TextSplitterError::UnknownEncoding(_)
                | TextSplitterError::TokenizerUnavailable(_)
                | TextSplitterError::InvalidSplitterOptions(_) => e.to_string(),
            })
            .collect();

        assert_eq!(messages[0], "Got 2 texts but 1 metadata maps");
        assert!(messages[1].contains("o9k"));
        assert!(messages[2].contains("model x"));
        assert!(messages[3].contains("overlap"));
    }
}
