//! Top-k cosine ranking over a [`TfIdfIndex`].

use std::cmp::Ordering;

use tracing::debug;

use crate::document::{RankedResult, SearchResult};
use crate::index::TfIdfIndex;

/// Rank the chunks of `index` against `query` and return the best `k`.
///
/// Results are ordered by descending score; equal scores keep index order.
/// `k` is clamped to the number of chunks. A query with no known terms
/// scores every chunk zero and so returns the first `k` chunks in index order.
pub fn rank(index: &TfIdfIndex, query: &str, k: usize) -> RankedResult {
    let query_vector = index.project(query);
    let scores = index.similarities(&query_vector);

    let positions = top_k_positions(&scores, k);

    debug!(
        k,
        returned = positions.len(),
        query_terms = query_vector.entries().len(),
        "ranked chunks"
    );

    positions
        .into_iter()
        .filter_map(|position| {
            index
                .chunk(position)
                .map(|chunk| SearchResult { chunk: chunk.clone(), score: scores[position] })
        })
        .collect()
}

/// Positions of the `k` best scores, keyed by (descending score, ascending position).
///
/// The key is a total order, so partial selection followed by sorting gives
/// the same result as a stable sort of the whole list.
fn top_k_positions(scores: &[f32], k: usize) -> Vec<usize> {
    let k = k.min(scores.len());
    if k == 0 {
        return Vec::new();
    }

    let by_rank = |a: &usize, b: &usize| -> Ordering {
        scores[*b].total_cmp(&scores[*a]).then_with(|| a.cmp(b))
    };

    let mut positions: Vec<usize> = (0..scores.len()).collect();
    if k < positions.len() {
        positions.select_nth_unstable_by(k - 1, by_rank);
        positions.truncate(k);
    }
    positions.sort_unstable_by(by_rank);
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_original_order() {
        assert_eq!(top_k_positions(&[0.5, 0.9, 0.5, 0.9, 0.5], 5), vec![1, 3, 0, 2, 4]);
        assert_eq!(top_k_positions(&[0.5, 0.9, 0.5, 0.9, 0.5], 3), vec![1, 3, 0]);
    }

    #[test]
    fn all_zero_scores_return_index_order() {
        assert_eq!(top_k_positions(&[0.0; 6], 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn k_is_clamped() {
        assert_eq!(top_k_positions(&[0.1, 0.2], 3), vec![1, 0]);
        assert!(top_k_positions(&[0.1, 0.2], 0).is_empty());
    }
}
