use async_trait::async_trait;

use super::{DocumentTransformer, TransformerError};
use crate::schemas::Document;

/// Reorders documents so the most relevant ones sit at the edges of the list.
///
/// Models tend to miss information placed in the middle of a long context.
/// Given documents sorted by descending relevance, the most relevant one ends
/// up first, the second most relevant last, and the least relevant in the middle.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongContextReorder;

impl LongContextReorder {
    pub fn new() -> Self {
        Self
    }

    pub fn reorder(documents: Vec<Document>) -> Vec<Document> {
        let mut reordered = std::collections::VecDeque::with_capacity(documents.len());
        for (i, doc) in documents.into_iter().rev().enumerate() {
            if i % 2 == 1 {
                reordered.push_back(doc);
            } else {
                reordered.push_front(doc);
            }
        }
        reordered.into()
    }
}

#[async_trait]
impl DocumentTransformer for LongContextReorder {
    async fn transform_documents(
        &self,
        documents: Vec<Document>,
    ) -> Result<Vec<Document>, TransformerError> {
        Ok(Self::reorder(documents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.page_content.as_str()).collect()
    }

    #[tokio::test]
    async fn test_reorder_puts_most_relevant_at_edges() {
        let docs: Vec<Document> = (1..=5).map(|i| Document::new(i.to_string())).collect();
        let reordered = LongContextReorder.transform_documents(docs).await.unwrap();
        assert_eq!(contents(&reordered), vec!["1", "3", "5", "4", "2"]);
    }

    #[tokio::test]
    async fn test_reorder_even_length() {
        let docs: Vec<Document> = (1..=4).map(|i| Document::new(i.to_string())).collect();
        let reordered = LongContextReorder.transform_documents(docs).await.unwrap();
        assert_eq!(contents(&reordered), vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn test_reorder_empty_and_single() {
        let empty = tokio_test::block_on(LongContextReorder.transform_documents(vec![])).unwrap();
        assert!(empty.is_empty());
        let single = LongContextReorder::reorder(vec![Document::new("only")]);
        assert_eq!(contents(&single), vec!["only"]);
    }
}
