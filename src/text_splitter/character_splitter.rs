use std::collections::VecDeque;

use async_trait::async_trait;

use super::{TextSplitter, TextSplitterError};

/// Configuration for CharacterTextSplitter
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CharacterTextSplitterOptions {
    /// Maximum chunk size (in characters)
    pub chunk_size: usize,
    /// Overlap between chunks (in characters)
    pub chunk_overlap: usize,
    /// Separator to split on. An empty separator splits into characters.
    pub separator: String,
    /// Whether to trim whitespace from chunks
    pub trim_chunks: bool,
}

impl Default for CharacterTextSplitterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterTextSplitterOptions {
    pub fn new() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            separator: "\n\n".to_string(),
            trim_chunks: true,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_chunk_overlap(mut self, chunk_overlap: usize) -> Self {
        self.chunk_overlap = chunk_overlap;
        self
    }

    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_trim_chunks(mut self, trim_chunks: bool) -> Self {
        self.trim_chunks = trim_chunks;
        self
    }
}

/// CharacterTextSplitter splits text on a single separator and greedily
/// merges the pieces back into chunks of at most `chunk_size` characters.
///
/// Consecutive chunks share up to `chunk_overlap` characters of trailing
/// pieces. A single piece longer than `chunk_size` becomes its own chunk.
#[derive(Debug, Clone, Default)]
pub struct CharacterTextSplitter {
    options: CharacterTextSplitterOptions,
}

impl CharacterTextSplitter {
    pub fn new(options: CharacterTextSplitterOptions) -> Self {
        Self { options }
    }

    fn split_pieces<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if self.options.separator.is_empty() {
            text.char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect()
        } else {
            text.split(self.options.separator.as_str())
                .filter(|piece| !piece.is_empty())
                .collect()
        }
    }

    fn join_pieces(&self, pieces: &VecDeque<&str>) -> Option<String> {
        let joined = pieces
            .iter()
            .copied()
            .collect::<Vec<&str>>()
            .join(&self.options.separator);
        let joined = if self.options.trim_chunks {
            joined.trim().to_string()
        } else {
            joined
        };
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    fn merge_pieces(&self, pieces: Vec<&str>) -> Vec<String> {
        let chunk_size = self.options.chunk_size;
        let chunk_overlap = self.options.chunk_overlap;
        let separator_len = self.options.separator.chars().count();

        let mut chunks = Vec::new();
        let mut current: VecDeque<&str> = VecDeque::new();
        let mut total = 0usize;

        for piece in pieces {
            let len = piece.chars().count();
            let joiner = |current: &VecDeque<&str>| {
                if current.is_empty() {
                    0
                } else {
                    separator_len
                }
            };

            if total + len + joiner(&current) > chunk_size {
                if total > chunk_size {
                    log::warn!(
                        "Created a chunk of size {}, which is longer than the specified {}",
                        total,
                        chunk_size
                    );
                }
                if !current.is_empty() {
                    if let Some(chunk) = self.join_pieces(&current) {
                        chunks.push(chunk);
                    }
                    while total > chunk_overlap
                        || (total + len + joiner(&current) > chunk_size && total > 0)
                    {
                        let Some(first) = current.pop_front() else {
                            break;
                        };
                        let dropped_separator = if current.is_empty() { 0 } else { separator_len };
                        total = total.saturating_sub(first.chars().count() + dropped_separator);
                    }
                }
            }

            current.push_back(piece);
            total += len + if current.len() > 1 { separator_len } else { 0 };
        }

        if let Some(chunk) = self.join_pieces(&current) {
            chunks.push(chunk);
        }

        chunks
    }
}

#[async_trait]
impl TextSplitter for CharacterTextSplitter {
    async fn split_text(&self, text: &str) -> Result<Vec<String>, TextSplitterError> {
        if self.options.chunk_size == 0 {
            return Err(TextSplitterError::InvalidSplitterOptions(
                "chunk_size must be positive".to_string(),
            ));
        }
        if self.options.chunk_overlap > self.options.chunk_size {
            return Err(TextSplitterError::InvalidSplitterOptions(format!(
                "chunk_overlap {} is larger than chunk_size {}",
                self.options.chunk_overlap, self.options.chunk_size
            )));
        }
        if text.is_empty() {
            return Ok(vec![]);
        }

        Ok(self.merge_pieces(self.split_pieces(text)))
    }
}
