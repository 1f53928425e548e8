//! Frozen TF-IDF vector space over a chunk collection.
//!
//! [`TfIdfIndex::build`] tokenizes every chunk, fixes the vocabulary and the
//! inverse document frequencies, and stores one L2-normalized sparse vector
//! per chunk. Nothing is updated after construction: adding pages means
//! building a new index.
//!
//! Weights follow the smoothed scheme
//! `idf(t) = ln((1 + n) / (1 + df(t))) + 1`, where `n` is the number of
//! chunks and `df(t)` the number of chunks containing `t`.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::debug;

use crate::document::Chunk;
use crate::error::{RagError, Result};
use crate::tokenize::tokenize;

/// A sparse, L2-normalized weight vector.
///
/// Entries are `(dimension, weight)` pairs sorted by dimension with no zero
/// weights. A vector with no entries is the zero vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Weight raw term counts by `idf` and normalize to unit length.
    fn from_counts(counts: BTreeMap<usize, u32>, idf: &[f32]) -> Self {
        let mut entries: Vec<(usize, f32)> =
            counts.into_iter().map(|(dim, count)| (dim, count as f32 * idf[dim])).collect();

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut entries {
                *weight /= norm;
            }
        }
        Self { entries }
    }

    /// Non-zero `(dimension, weight)` pairs, sorted by dimension.
    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    /// Whether the vector has no non-zero entries.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product of two sparse vectors. On unit vectors this is the cosine
    /// similarity; against the zero vector it is 0.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_dim, a_w) = self.entries[i];
            let (b_dim, b_w) = other.entries[j];
            match a_dim.cmp(&b_dim) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// An immutable lexical index over one session's chunks.
///
/// Vectors are only comparable with queries projected by the same index.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    chunks: Vec<Chunk>,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    vectors: Vec<SparseVector>,
}

impl TfIdfIndex {
    /// Build the index from the full chunk collection.
    ///
    /// A corpus whose chunks contain no terms at all is accepted; every
    /// score against it is zero.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::EmptyCorpus`] if `chunks` is empty.
    pub fn build(chunks: Vec<Chunk>) -> Result<Self> {
        if chunks.is_empty() {
            return Err(RagError::EmptyCorpus);
        }

        let tokenized: Vec<Vec<String>> = chunks.iter().map(|c| tokenize(&c.text)).collect();

        // Dimensions follow lexicographic term order.
        let terms: BTreeSet<&str> = tokenized.iter().flatten().map(String::as_str).collect();
        let vocabulary: HashMap<String, usize> =
            terms.into_iter().enumerate().map(|(dim, term)| (term.to_string(), dim)).collect();

        let counts: Vec<BTreeMap<usize, u32>> =
            tokenized.iter().map(|tokens| count_terms(tokens, &vocabulary)).collect();

        let mut document_frequency = vec![0u32; vocabulary.len()];
        for chunk_counts in &counts {
            for dim in chunk_counts.keys() {
                document_frequency[*dim] += 1;
            }
        }

        let n = chunks.len() as f32;
        let idf: Vec<f32> =
            document_frequency.iter().map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0).collect();

        let vectors = counts.into_iter().map(|c| SparseVector::from_counts(c, &idf)).collect();

        debug!(chunk_count = chunks.len(), vocabulary_size = vocabulary.len(), "built tf-idf index");

        Ok(Self { chunks, vocabulary, idf, vectors })
    }

    /// Project a query into this index's vector space.
    ///
    /// Out-of-vocabulary terms are ignored; a query with no known terms
    /// yields the zero vector.
    pub fn project(&self, query: &str) -> SparseVector {
        let counts = count_terms(&tokenize(query), &self.vocabulary);
        SparseVector::from_counts(counts, &self.idf)
    }

    /// Cosine similarity between a projected query and every chunk, in index order.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f32> {
        self.vectors.iter().map(|v| v.dot(query)).collect()
    }

    /// All indexed chunks, in index order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The chunk at `position`, if any.
    pub fn chunk(&self, position: usize) -> Option<&Chunk> {
        self.chunks.get(position)
    }

    /// The unit vector of the chunk at `position`, if any.
    pub fn vector(&self, position: usize) -> Option<&SparseVector> {
        self.vectors.get(position)
    }

    /// Number of indexed chunks. Never zero.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Always `false`: an index cannot be built from zero chunks.
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Number of distinct terms in the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// The dimension assigned to `term`, if it is in the vocabulary.
    pub fn dimension(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// The inverse document frequency of `term`, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.dimension(term).map(|dim| self.idf[dim])
    }
}

/// Count the in-vocabulary terms of a token stream.
fn count_terms(tokens: &[String], vocabulary: &HashMap<String, usize>) -> BTreeMap<usize, u32> {
    let mut counts = BTreeMap::new();
    for token in tokens {
        if let Some(&dim) = vocabulary.get(token) {
            *counts.entry(dim).or_insert(0) += 1;
        }
    }
    counts
}
