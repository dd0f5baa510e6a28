use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A unit of retrieved text together with its metadata.
///
/// `score` is the relevance assigned by whatever produced the document
/// (a vector store, a reranker). It defaults to `0.0`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    #[serde(default)]
    pub score: f64,
}

impl Document {
    /// Constructs a new `Document` with the given content and no metadata.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let doc = Document::new("This is a document");
    /// ```
    pub fn new<S: Into<String>>(page_content: S) -> Self {
        Document {
            page_content: page_content.into(),
            metadata: HashMap::new(),
            score: 0.0,
        }
    }

    /// Replaces the metadata of the document.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new("")
    }
}
