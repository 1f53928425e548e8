//! Session-scoped retrieval facade.
//!
//! A [`Retriever`] is built once per session from the full chunk collection
//! and is read-only afterwards, so a shared reference can serve concurrent
//! queries without locking.
//!
//! # Example
//!
//! ```rust,ignore
//! use paperqa_rag::{Retriever, segment};
//!
//! let chunks = segment(&pages, 500, 50)?;
//! let retriever = Retriever::new(chunks, 3)?;
//! for result in retriever.retrieve("what is multi-head attention?") {
//!     println!("{} (page {}): {:.3}", result.chunk.filename, result.chunk.page_number, result.score);
//! }
//! ```

use tracing::{debug, info};

use crate::config::RagConfig;
use crate::document::{Chunk, RankedResult};
use crate::error::{RagError, Result};
use crate::index::TfIdfIndex;
use crate::ranker::rank;

/// Owns the session's index and answers `retrieve` calls against it.
#[derive(Debug, Clone)]
pub struct Retriever {
    index: TfIdfIndex,
    top_k: usize,
}

impl Retriever {
    /// Build the index eagerly from `chunks`.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] if `chunks` is empty and
    /// [`RagError::ConfigError`] if `top_k` is zero.
    pub fn new(chunks: Vec<Chunk>, top_k: usize) -> Result<Self> {
        if top_k == 0 {
            return Err(RagError::ConfigError("top_k must be greater than zero".to_string()));
        }
        let index = TfIdfIndex::build(chunks)?;
        info!(
            chunk_count = index.len(),
            vocabulary_size = index.vocabulary_size(),
            top_k,
            "retriever ready"
        );
        Ok(Self { index, top_k })
    }

    /// Build a retriever using the `top_k` of a [`RagConfig`].
    pub fn from_config(chunks: Vec<Chunk>, config: &RagConfig) -> Result<Self> {
        Self::new(chunks, config.top_k)
    }

    /// Return the best `top_k` chunks for `query`.
    ///
    /// A blank query has a well-defined empty answer and returns no results.
    pub fn retrieve(&self, query: &str) -> RankedResult {
        self.retrieve_with_k(query, self.top_k)
    }

    /// Like [`retrieve`](Self::retrieve) with a per-call `k`.
    pub fn retrieve_with_k(&self, query: &str, k: usize) -> RankedResult {
        if query.trim().is_empty() {
            debug!("blank query, returning no results");
            return RankedResult::new();
        }
        rank(&self.index, query, k)
    }

    /// Default number of results per query.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// The frozen index backing this retriever.
    pub fn index(&self) -> &TfIdfIndex {
        &self.index
    }

    /// All chunks of the session, in index order.
    pub fn chunks(&self) -> &[Chunk] {
        self.index.chunks()
    }
}
