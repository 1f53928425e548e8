//! Data types for document pages, chunks, and ranked results.

use serde::{Deserialize, Serialize};

/// One page of source text, as supplied by ingestion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// The raw text of the page.
    pub text: String,
    /// The file the page was read from.
    pub filename: String,
    /// The 1-based page number within `filename`.
    pub page_number: u32,
}

impl Document {
    /// Create a new page record.
    pub fn new(text: impl Into<String>, filename: impl Into<String>, page_number: u32) -> Self {
        Self { text: text.into(), filename: filename.into(), page_number }
    }
}

/// A bounded segment of a [`Document`] with its provenance.
///
/// A chunk never spans two pages: `filename` and `page_number` always
/// come from the single parent document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// The text content of the chunk.
    pub text: String,
    /// The file of the parent document.
    pub filename: String,
    /// The page number of the parent document.
    pub page_number: u32,
    /// Position of this chunk within its page, starting at 0.
    pub chunk_index: usize,
}

impl Chunk {
    /// Create a chunk carrying the provenance of `document`.
    pub fn from_document(document: &Document, text: impl Into<String>, chunk_index: usize) -> Self {
        Self {
            text: text.into(),
            filename: document.filename.clone(),
            page_number: document.page_number,
            chunk_index,
        }
    }
}

/// A retrieved [`Chunk`] paired with a relevance score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// The retrieved chunk.
    pub chunk: Chunk,
    /// The cosine similarity to the query, in `[0, 1]`.
    pub score: f32,
}

/// Ranked retrieval output: at most `k` results, descending by score.
pub type RankedResult = Vec<SearchResult>;
