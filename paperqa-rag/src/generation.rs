//! Answer generation from retrieved context.
//!
//! The [`Generator`] trait hides the remote language model. The helpers in
//! this module build the grounded prompt from ranked chunks and turn the
//! chunk provenance into a citation list.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::SearchResult;
use crate::error::Result;

/// The reply used when the context does not contain the answer.
pub const UNKNOWN_ANSWER: &str = "I don't know";

/// A model that turns a prompt into answer text.
///
/// # Example
///
/// ```rust,ignore
/// use paperqa_rag::Generator;
///
/// let text = generator.generate(&prompt).await?;
/// ```
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// A short provider name used in logs and errors.
    fn name(&self) -> &str;
}

/// One cited page, with how many retrieved chunks came from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub filename: String,
    pub page_number: u32,
    /// Number of retrieved chunks from this page. Tracked but not ranked on.
    pub occurrences: usize,
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Page {})", self.filename, self.page_number)
    }
}

/// A generated answer with its sources and the context it was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    /// Cited pages in first-seen ranked order.
    pub sources: Vec<Citation>,
    /// The ranked chunks that were placed in the prompt.
    pub contexts: Vec<SearchResult>,
}

/// Concatenate chunk texts in ranked order, separated by a blank line.
pub fn build_context(results: &[SearchResult]) -> String {
    results.iter().map(|r| r.chunk.text.as_str()).collect::<Vec<_>>().join("\n\n")
}

/// Build the grounded-answer prompt for `question` over `context`.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are an expert AI research assistant. Answer the user's question based ONLY on the provided context.\n\
         If the answer is not in the context, say \"{UNKNOWN_ANSWER}\" - do not make up answers.\n\
         \n\
         CONTEXT:\n\
         {context}\n\
         \n\
         QUESTION: {question}\n\
         \n\
         ANSWER:\n"
    )
}

/// Deduplicate `(filename, page_number)` pairs in first-seen order, counting repeats.
pub fn collect_citations(results: &[SearchResult]) -> Vec<Citation> {
    let mut citations: Vec<Citation> = Vec::new();
    for result in results {
        let chunk = &result.chunk;
        match citations
            .iter_mut()
            .find(|c| c.filename == chunk.filename && c.page_number == chunk.page_number)
        {
            Some(citation) => citation.occurrences += 1,
            None => citations.push(Citation {
                filename: chunk.filename.clone(),
                page_number: chunk.page_number,
                occurrences: 1,
            }),
        }
    }
    citations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Chunk;

    fn result(text: &str, filename: &str, page_number: u32) -> SearchResult {
        SearchResult {
            chunk: Chunk { text: text.into(), filename: filename.into(), page_number, chunk_index: 0 },
            score: 0.5,
        }
    }

    #[test]
    fn context_joins_with_blank_line() {
        let results = vec![result("first", "a.txt", 1), result("second", "b.txt", 2)];
        assert_eq!(build_context(&results), "first\n\nsecond");
        assert_eq!(build_context(&[]), "");
    }

    #[test]
    fn prompt_contains_grounding_rules() {
        let prompt = build_prompt("What is LAMBADA?", "LAMBADA is a benchmark.");
        assert!(prompt.contains("based ONLY on the provided context"));
        assert!(prompt.contains("say \"I don't know\""));
        assert!(prompt.contains("CONTEXT:\nLAMBADA is a benchmark.\n"));
        assert!(prompt.contains("QUESTION: What is LAMBADA?"));
        assert!(prompt.trim_end().ends_with("ANSWER:"));
    }

    #[test]
    fn citations_dedup_in_first_seen_order() {
        let results = vec![
            result("x", "gpt3.txt", 5),
            result("y", "attention.txt", 2),
            result("z", "gpt3.txt", 5),
            result("w", "gpt3.txt", 6),
        ];
        let citations = collect_citations(&results);
        let labels: Vec<String> = citations.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["gpt3.txt (Page 5)", "attention.txt (Page 2)", "gpt3.txt (Page 6)"]);
        assert_eq!(citations[0].occurrences, 2);
        assert_eq!(citations[1].occurrences, 1);
    }
}
