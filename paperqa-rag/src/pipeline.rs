//! Question-answering pipeline orchestrator.
//!
//! The [`RagPipeline`] coordinates the per-session workflow by composing a
//! [`Chunker`] and an optional [`Generator`]:
//!
//! - [`open_session`](RagPipeline::open_session): pages → chunks → [`Retriever`]
//! - [`answer`](RagPipeline::answer): question → ranked chunks → prompt → answer
//!
//! The returned [`Retriever`] is the session context. The caller owns it and
//! passes it back for every question; dropping it ends the session.
//!
//! # Example
//!
//! ```rust,ignore
//! use paperqa_rag::{RagConfig, RagPipeline, TextLoader};
//!
//! let pipeline = RagPipeline::builder()
//!     .config(RagConfig::default())
//!     .generator(Arc::new(my_generator))
//!     .build()?;
//!
//! let pages = TextLoader::new("data").load()?;
//! let session = pipeline.open_session(&pages)?;
//! let answer = pipeline.answer(&session, "What is multi-head attention?").await?;
//! ```

use std::sync::Arc;

use tracing::{error, info};

use crate::chunking::{Chunker, RecursiveChunker, segment_with};
use crate::config::RagConfig;
use crate::document::Document;
use crate::error::{RagError, Result};
use crate::generation::{Answer, Generator, build_context, build_prompt, collect_citations};
use crate::retriever::Retriever;

/// The question-answering pipeline.
///
/// Construct one via [`RagPipeline::builder()`].
pub struct RagPipeline {
    config: RagConfig,
    chunker: Arc<dyn Chunker>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipeline {
    /// Create a new [`RagPipelineBuilder`].
    pub fn builder() -> RagPipelineBuilder {
        RagPipelineBuilder::default()
    }

    /// Return a reference to the pipeline configuration.
    pub fn config(&self) -> &RagConfig {
        &self.config
    }

    /// Segment `documents` and build the session's [`Retriever`].
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] if the pages produce no chunks
    /// (no pages, or only blank pages).
    pub fn open_session(&self, documents: &[Document]) -> Result<Retriever> {
        let chunks = segment_with(self.chunker.as_ref(), documents);
        let chunk_count = chunks.len();

        let retriever = Retriever::from_config(chunks, &self.config).inspect_err(|e| {
            error!(page_count = documents.len(), error = %e, "failed to build retriever");
        })?;

        info!(chunk_count, page_count = documents.len(), "processed document chunks");
        Ok(retriever)
    }

    /// Answer `question` from the context ranked by `retriever`.
    ///
    /// # Errors
    ///
    /// - [`RagError::MalformedQuery`] if `question` is blank; the generator is not called.
    /// - [`RagError::ConfigError`] if no generator is configured.
    /// - Any error from the generator, unchanged.
    pub async fn answer(&self, retriever: &Retriever, question: &str) -> Result<Answer> {
        if question.trim().is_empty() {
            return Err(RagError::MalformedQuery);
        }
        let generator = self.generator.as_ref().ok_or_else(|| {
            RagError::ConfigError("a generator is required to answer questions".to_string())
        })?;

        let contexts = retriever.retrieve(question);
        let prompt = build_prompt(question, &build_context(&contexts));

        let text = generator.generate(&prompt).await.inspect_err(|e| {
            error!(provider = generator.name(), error = %e, "generation failed");
        })?;

        let sources = collect_citations(&contexts);
        info!(
            provider = generator.name(),
            context_count = contexts.len(),
            source_count = sources.len(),
            "answered question"
        );

        Ok(Answer { text, sources, contexts })
    }
}

/// Builder for constructing a [`RagPipeline`].
///
/// `config` is required. The chunker defaults to a [`RecursiveChunker`]
/// using the config's chunking parameters; the generator is only needed for
/// [`RagPipeline::answer`].
#[derive(Default)]
pub struct RagPipelineBuilder {
    config: Option<RagConfig>,
    chunker: Option<Arc<dyn Chunker>>,
    generator: Option<Arc<dyn Generator>>,
}

impl RagPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: RagConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the default page chunker.
    pub fn chunker(mut self, chunker: Arc<dyn Chunker>) -> Self {
        self.chunker = Some(chunker);
        self
    }

    /// Set the answer generator.
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Build the [`RagPipeline`], validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`] if `config` is missing or invalid.
    pub fn build(self) -> Result<RagPipeline> {
        let config =
            self.config.ok_or_else(|| RagError::ConfigError("config is required".to_string()))?;
        config.validate()?;

        let chunker: Arc<dyn Chunker> = match self.chunker {
            Some(chunker) => chunker,
            None => Arc::new(RecursiveChunker::from_config(&config)?),
        };

        Ok(RagPipeline { config, chunker, generator: self.generator })
    }
}
