use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use text_splitter::{ChunkConfig, ChunkSizer, TextSplitter as ChunkSplitter};
use tiktoken_rs::CoreBPE;

use super::{TextSplitter, TextSplitterError};

/// BPE used to measure chunk sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenEncoding {
    Cl100kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
    /// Encoding used by a named model, e.g. `gpt-4`.
    Model(String),
}

impl TokenEncoding {
    fn load(&self) -> Result<CoreBPE, TextSplitterError> {
        let bpe = match self {
            Self::Cl100kBase => tiktoken_rs::cl100k_base(),
            Self::P50kBase => tiktoken_rs::p50k_base(),
            Self::P50kEdit => tiktoken_rs::p50k_edit(),
            Self::R50kBase => tiktoken_rs::r50k_base(),
            Self::Model(model) => tiktoken_rs::get_bpe_from_model(model),
        };
        bpe.map_err(|_| TextSplitterError::TokenizerUnavailable(self.to_string()))
    }
}

impl fmt::Display for TokenEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cl100kBase => f.write_str("cl100k_base"),
            Self::P50kBase => f.write_str("p50k_base"),
            Self::P50kEdit => f.write_str("p50k_edit"),
            Self::R50kBase => f.write_str("r50k_base"),
            Self::Model(model) => write!(f, "model {model}"),
        }
    }
}

impl FromStr for TokenEncoding {
    type Err = TextSplitterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cl100k_base" => Ok(Self::Cl100kBase),
            "p50k_base" => Ok(Self::P50kBase),
            "p50k_edit" => Ok(Self::P50kEdit),
            "r50k_base" | "gpt2" => Ok(Self::R50kBase),
            _ => Err(TextSplitterError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Options for [`TokenSplitter`]. Sizes are counted in tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSplitterOptions {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub encoding: TokenEncoding,
    pub trim_chunks: bool,
}

impl Default for TokenSplitterOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSplitterOptions {
    pub fn new() -> Self {
        Self {
            chunk_size: 512,
            chunk_overlap: 0,
            encoding: TokenEncoding::Cl100kBase,
            trim_chunks: false,
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

    pub fn with_encoding(mut self, encoding: TokenEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.encoding = TokenEncoding::Model(model.to_string());
        self
    }

    pub fn with_trim_chunks(mut self, trim_chunks: bool) -> Self {
        self.trim_chunks = trim_chunks;
        self
    }
}

struct TiktokenSizer(CoreBPE);

impl ChunkSizer for TiktokenSizer {
    fn size(&self, chunk: &str) -> usize {
        self.0.encode_ordinary(chunk).len()
    }
}

/// Splits text into chunks measured in tiktoken tokens.
///
/// The tokenizer is loaded once, when the splitter is built.
pub struct TokenSplitter {
    options: TokenSplitterOptions,
    chunker: ChunkSplitter<TiktokenSizer>,
}

impl TokenSplitter {
    pub fn new(options: TokenSplitterOptions) -> Result<Self, TextSplitterError> {
        let bpe = options.encoding.load()?;
        let config = ChunkConfig::new(options.chunk_size)
            .with_sizer(TiktokenSizer(bpe))
            .with_trim(options.trim_chunks)
            .with_overlap(options.chunk_overlap)?;

        Ok(Self {
            options,
            chunker: ChunkSplitter::new(config),
        })
    }

    pub fn options(&self) -> &TokenSplitterOptions {
        &self.options
    }
}

impl fmt::Debug for TokenSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSplitter")
            .field("options", &self.options)
            .finish()
    }
}

#[async_trait]
impl TextSplitter for TokenSplitter {
    async fn split_text(&self, text: &str) -> Result<Vec<String>, TextSplitterError> {
        Ok(self.chunker.chunks(text).map(str::to_string).collect())
    }
}
