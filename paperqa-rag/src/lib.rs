//! # paperqa-rag
//!
//! Lexical retrieval for grounded question answering over document pages.
//!
//! Pages are split into overlapping chunks, indexed in a TF-IDF vector space
//! that is frozen for the session, and ranked against each question by
//! cosine similarity. The top chunks become the context of a prompt sent to
//! a [`Generator`], and their provenance becomes the answer's citations.
//!
//! ## Features
//!
//! - `gemini`: [`GeminiGenerator`](gemini::GeminiGenerator) backed by the
//!   Gemini REST API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use paperqa_rag::{RagConfig, Retriever, TextLoader, segment};
//!
//! let config = RagConfig::default();
//! let pages = TextLoader::new("data").load()?;
//! let chunks = segment(&pages, config.chunk_size, config.chunk_overlap)?;
//! let retriever = Retriever::from_config(chunks, &config)?;
//!
//! for result in retriever.retrieve("Why self-attention?") {
//!     println!("{:.3} {} p.{}", result.score, result.chunk.filename, result.chunk.page_number);
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod document;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingest;
pub mod pipeline;
pub mod ranker;
pub mod retriever;
pub mod tokenize;

#[cfg(feature = "gemini")]
pub mod gemini;

pub use chunking::{Chunker, RecursiveChunker, segment, segment_with};
pub use config::{GenerationConfig, RagConfig, RagConfigBuilder};
pub use document::{Chunk, Document, RankedResult, SearchResult};
pub use error::{RagError, Result};
pub use generation::{Answer, Citation, Generator, build_context, build_prompt, collect_citations};
pub use index::{SparseVector, TfIdfIndex};
pub use ingest::TextLoader;
pub use pipeline::{RagPipeline, RagPipelineBuilder};
pub use ranker::rank;
pub use retriever::Retriever;

#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;
