//! Page segmentation.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], which
//! splits page text at the most natural boundary available:
//!
//! 1. paragraph break (`\n\n`)
//! 2. line break (`\n`)
//! 3. sentence end (`. `)
//! 4. word boundary (` `)
//! 5. hard character cut
//!
//! Pieces that still exceed `chunk_size` are split again with the next
//! separator. Small pieces are merged back together up to `chunk_size`, and
//! each emitted chunk shares up to `chunk_overlap` trailing characters with
//! the next one.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::{RagConfig, validate_chunking};
use crate::document::{Chunk, Document};
use crate::error::Result;

/// Separators in priority order. The empty separator is the hard cut.
pub const SEPARATORS: [&str; 5] = ["\n\n", "\n", ". ", " ", ""];

/// A strategy for splitting a page into chunks.
///
/// Implementations must be deterministic and must copy the page's
/// provenance onto every chunk they produce.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document text is empty or whitespace-only.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text recursively by paragraphs, lines, sentences, words, then characters.
///
/// Lengths are counted in characters, not bytes.
///
/// # Example
///
/// ```rust,ignore
/// use paperqa_rag::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(500, 50)?;
/// let chunks = chunker.chunk(&page);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size`: maximum number of characters per chunk
    /// * `chunk_overlap`: maximum number of characters shared by consecutive chunks
    ///
    /// # Errors
    ///
    /// Returns [`RagError::ConfigError`](crate::RagError::ConfigError) if
    /// `chunk_overlap >= chunk_size`.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        validate_chunking(chunk_size, chunk_overlap)?;
        Ok(Self { chunk_size, chunk_overlap })
    }

    /// Create a chunker from the chunking parameters of a [`RagConfig`].
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        Self::new(config.chunk_size, config.chunk_overlap)
    }

    /// Maximum number of characters per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Maximum number of characters carried into the next chunk.
    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split raw text into trimmed, non-empty chunk strings in reading order.
    pub fn split_text(&self, text: &str) -> Vec<String> {
        self.split_recursive(text, &SEPARATORS)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        // Use the first separator that actually occurs; the empty separator always does.
        let (separator, remaining) =
            match separators.iter().position(|s| s.is_empty() || text.contains(s)) {
                Some(i) => (separators[i], &separators[i + 1..]),
                None => ("", &separators[separators.len()..]),
            };

        let pieces = if separator.is_empty() {
            split_chars(text)
        } else {
            split_keeping_separator(text, separator)
        };

        let mut chunks = Vec::new();
        let mut pending: Vec<&str> = Vec::new();

        for piece in pieces {
            if char_len(piece) < self.chunk_size {
                pending.push(piece);
                continue;
            }

            if !pending.is_empty() {
                chunks.extend(self.merge(&pending));
                pending.clear();
            }

            if remaining.is_empty() {
                push_trimmed(&mut chunks, piece);
            } else {
                chunks.extend(self.split_recursive(piece, remaining));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(&pending));
        }

        chunks
    }

    /// Greedily merge consecutive small pieces into chunks of at most
    /// `chunk_size` characters, carrying trailing pieces of at most
    /// `chunk_overlap` characters into the next chunk.
    fn merge(&self, pieces: &[&str]) -> Vec<String> {
        let mut merged = Vec::new();
        let mut window: VecDeque<(&str, usize)> = VecDeque::new();
        let mut total = 0;

        for &piece in pieces {
            let len = char_len(piece);

            if total + len > self.chunk_size && !window.is_empty() {
                push_trimmed(&mut merged, &join(&window));

                while total > self.chunk_overlap || (total + len > self.chunk_size && total > 0) {
                    let Some((_, front_len)) = window.pop_front() else { break };
                    total -= front_len;
                }
            }

            window.push_back((piece, len));
            total += len;
        }

        push_trimmed(&mut merged, &join(&window));
        merged
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        if document.text.trim().is_empty() {
            return Vec::new();
        }

        self.split_text(&document.text)
            .into_iter()
            .enumerate()
            .map(|(i, text)| Chunk::from_document(document, text, i))
            .collect()
    }
}

/// Segment every page with a [`RecursiveChunker`].
///
/// Chunks come back in page order, then reading order within each page.
/// Empty pages contribute nothing.
///
/// # Errors
///
/// Returns [`RagError::ConfigError`](crate::RagError::ConfigError) if
/// `chunk_overlap >= chunk_size`, before any page is processed.
pub fn segment(
    documents: &[Document],
    chunk_size: usize,
    chunk_overlap: usize,
) -> Result<Vec<Chunk>> {
    let chunker = RecursiveChunker::new(chunk_size, chunk_overlap)?;
    Ok(segment_with(&chunker, documents))
}

/// Segment every page with an arbitrary [`Chunker`].
pub fn segment_with(chunker: &dyn Chunker, documents: &[Document]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for document in documents {
        let page_chunks = chunker.chunk(document);
        debug!(
            filename = %document.filename,
            page = document.page_number,
            chunk_count = page_chunks.len(),
            "segmented page"
        );
        chunks.extend(page_chunks);
    }
    chunks
}

/// Split text at a separator, keeping each separator at the start of the
/// segment that follows it. Empty segments are dropped.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    for (pos, _) in text.match_indices(separator) {
        if pos > start {
            result.push(&text[start..pos]);
        }
        start = pos;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

fn split_chars(text: &str) -> Vec<&str> {
    text.char_indices().map(|(i, c)| &text[i..i + c.len_utf8()]).collect()
}

fn join(window: &VecDeque<(&str, usize)>) -> String {
    window.iter().map(|(piece, _)| *piece).collect()
}

fn push_trimmed(out: &mut Vec<String>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker(size: usize, overlap: usize) -> RecursiveChunker {
        RecursiveChunker::new(size, overlap).unwrap()
    }

    #[test]
    fn word_level_merge_carries_overlap() {
        let chunks = chunker(10, 5).split_text("aaaa bbbb cccc dddd");
        assert_eq!(chunks, vec!["aaaa bbbb", "bbbb cccc", "cccc dddd"]);
    }

    #[test]
    fn paragraph_breaks_win_over_spaces() {
        let chunks = chunker(20, 0).split_text("alpha beta gamma\n\ndelta epsilon");
        assert_eq!(chunks, vec!["alpha beta gamma", "delta epsilon"]);
    }

    #[test]
    fn short_text_stays_whole() {
        let text = "First para.\n\nSecond para.";
        assert_eq!(chunker(100, 10).split_text(text), vec![text]);
    }

    #[test]
    fn separator_opens_the_following_piece() {
        let chunks = chunker(16, 0).split_text("One two three. Four five six.");
        assert_eq!(chunks, vec!["One two three", ". Four five six."]);

        let chunks = chunker(10, 0).split_text("Alpha beta. Gamma delta.");
        assert_eq!(chunks, vec!["Alpha beta", ". Gamma", "delta."]);
    }

    #[test]
    fn split_keeps_separators_in_front() {
        assert_eq!(split_keeping_separator("a. b. c", ". "), vec!["a", ". b", ". c"]);
        assert_eq!(split_keeping_separator(". a. ", ". "), vec![". a", ". "]);
        assert_eq!(split_keeping_separator("\n\n\n\n", "\n\n"), vec!["\n\n", "\n\n"]);
        assert_eq!(split_keeping_separator("plain", "\n"), vec!["plain"]);
    }

    #[test]
    fn hard_cut_when_no_separator_fits() {
        assert_eq!(chunker(4, 0).split_text("abcdefghij"), vec!["abcd", "efgh", "ij"]);
        assert_eq!(chunker(4, 1).split_text("abcdefghij"), vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn lengths_are_counted_in_chars() {
        let chunks = chunker(3, 0).split_text("ééééé");
        assert_eq!(chunks, vec!["ééé", "éé"]);
    }

    #[test]
    fn whitespace_page_produces_no_chunks() {
        let page = Document::new("   \n\n  \n", "blank.txt", 4);
        assert!(chunker(10, 2).chunk(&page).is_empty());
        assert!(chunker(10, 2).chunk(&Document::new("", "blank.txt", 5)).is_empty());
    }

    #[test]
    fn chunks_inherit_page_provenance() {
        let page = Document::new("aaaa bbbb cccc dddd", "paper.txt", 7);
        let chunks = chunker(10, 0).chunk(&page);
        assert_eq!(chunks.len(), 2);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.filename, "paper.txt");
            assert_eq!(chunk.page_number, 7);
            assert_eq!(chunk.chunk_index, i);
        }
    }

    #[test]
    fn invalid_overlap_is_rejected_up_front() {
        let pages = vec![Document::new("text", "a.txt", 1)];
        assert!(segment(&pages, 50, 50).is_err());
        assert!(segment(&pages, 50, 80).is_err());
        assert!(RecursiveChunker::new(0, 0).is_err());
    }
}
