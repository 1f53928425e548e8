//! Error types for the `paperqa-rag` crate.

use thiserror::Error;

/// Errors that can occur in retrieval and question-answering operations.
#[derive(Debug, Error)]
pub enum RagError {
    /// Indexing was attempted over zero chunks.
    ///
    /// Fatal to the session: retrying without more input cannot succeed.
    #[error("Empty corpus: cannot build an index from zero chunks")]
    EmptyCorpus,

    /// A question was blank where an answer was requested.
    #[error("Malformed query: question must not be empty")]
    MalformedQuery,

    /// A configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error occurred while loading source documents.
    #[error("Ingestion error ({path}): {message}")]
    IngestionError {
        /// The file or folder that could not be read.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// An error occurred in the answer generator.
    #[error("Generation error ({provider}): {message}")]
    GenerationError {
        /// The generation provider that produced the error.
        provider: String,
        /// A description of the failure.
        message: String,
    },
}

/// A convenience result type for RAG operations.
pub type Result<T> = std::result::Result<T, RagError>;
