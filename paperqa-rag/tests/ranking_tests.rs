//! Property and scenario tests for TF-IDF ranking.

use paperqa_rag::document::Chunk;
use paperqa_rag::error::RagError;
use paperqa_rag::index::TfIdfIndex;
use paperqa_rag::ranker::rank;
use paperqa_rag::retriever::Retriever;
use proptest::prelude::*;

const WORDS: [&str; 12] = [
    "attention", "mechanism", "transformer", "encoder", "decoder", "layer", "model", "token",
    "benchmark", "accuracy", "context", "scaling",
];

fn chunk(text: &str, page_number: u32) -> Chunk {
    Chunk { text: text.to_string(), filename: "paper.txt".into(), page_number, chunk_index: 0 }
}

fn arb_chunk_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(WORDS.to_vec()), 0..10)
        .prop_map(|words| words.join(" "))
}

fn arb_corpus() -> impl Strategy<Value = Vec<Chunk>> {
    proptest::collection::vec(arb_chunk_text(), 1..15).prop_map(|texts| {
        texts.iter().enumerate().map(|(i, text)| chunk(text, i as u32 + 1)).collect()
    })
}

/// Position of a ranked chunk in the corpus; page numbers are unique per chunk here.
fn position(result_chunk: &Chunk) -> usize {
    result_chunk.page_number as usize - 1
}

/// **Property: ranking order**
/// *For any* corpus and query, scores are non-increasing, equal scores keep
/// corpus order, and the result length is `min(k, corpus size)`.
mod prop_ranking_order {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn scores_descend_and_ties_are_stable(
            corpus in arb_corpus(),
            query in arb_chunk_text(),
            k in 1usize..20,
        ) {
            let size = corpus.len();
            let index = TfIdfIndex::build(corpus).unwrap();
            let results = rank(&index, &query, k);

            prop_assert_eq!(results.len(), k.min(size));
            for pair in results.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(position(&pair[0].chunk) < position(&pair[1].chunk));
                }
            }
            for result in &results {
                prop_assert!((0.0..=1.0 + 1e-5).contains(&result.score));
            }
        }

        #[test]
        fn top_k_is_a_prefix_of_the_full_ranking(
            corpus in arb_corpus(),
            query in arb_chunk_text(),
            k in 1usize..20,
        ) {
            let size = corpus.len();
            let index = TfIdfIndex::build(corpus).unwrap();
            let full = rank(&index, &query, size);
            let top = rank(&index, &query, k);
            prop_assert_eq!(&full[..top.len()], &top[..]);
        }
    }
}

/// **Property: out-of-vocabulary robustness**
/// *For any* corpus, a query of unseen words returns `min(k, corpus size)`
/// results in corpus order, all scored zero.
mod prop_oov {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn unseen_query_scores_zero(corpus in arb_corpus(), k in 1usize..20) {
            let size = corpus.len();
            let index = TfIdfIndex::build(corpus).unwrap();
            let results = rank(&index, "zzgarbage qqnonsense", k);

            prop_assert_eq!(results.len(), k.min(size));
            for (i, result) in results.iter().enumerate() {
                prop_assert_eq!(result.score, 0.0);
                prop_assert_eq!(position(&result.chunk), i);
            }
        }
    }
}

#[test]
fn overlapping_chunk_ranks_above_disjoint_chunk() {
    let index =
        TfIdfIndex::build(vec![chunk("dogs are loyal animals", 1), chunk("the cat sat on the mat", 2)])
            .unwrap();
    let results = rank(&index, "cat mat", 2);
    assert_eq!(results[0].chunk.text, "the cat sat on the mat");
    assert!(results[0].score > 0.0);
    assert_eq!(results[1].score, 0.0);
    assert!(results[0].score > results[1].score);
}

#[test]
fn k_larger_than_corpus_returns_everything() {
    let index =
        TfIdfIndex::build(vec![chunk("the cat sat on the mat", 1), chunk("dogs are loyal animals", 2)])
            .unwrap();
    assert_eq!(rank(&index, "cat", 3).len(), 2);
}

#[test]
fn empty_corpus_cannot_be_indexed() {
    assert!(matches!(TfIdfIndex::build(Vec::new()), Err(RagError::EmptyCorpus)));
    assert!(matches!(Retriever::new(Vec::new(), 3), Err(RagError::EmptyCorpus)));
}

#[test]
fn ranking_is_deterministic_on_a_fixed_corpus() {
    let texts = [
        "The attention mechanism relates positions of a single sequence.",
        "Recurrent models compute along symbol positions.",
        "Multi-head attention allows attending to different subspaces.",
        "The encoder maps an input sequence to continuous representations.",
        "The decoder generates an output sequence one element at a time.",
        "Self-attention mechanism layers are faster than recurrent layers.",
        "Positional encodings inject information about token order.",
        "Training used eight GPUs for twelve hours.",
        "Label smoothing hurts perplexity but improves accuracy.",
        "Attention visualizations show long-distance dependencies.",
    ];
    let corpus: Vec<Chunk> =
        texts.iter().enumerate().map(|(i, t)| chunk(t, i as u32 + 1)).collect();
    let retriever = Retriever::new(corpus, 3).unwrap();

    let first = retriever.retrieve("attention mechanism");
    assert_eq!(first.len(), 3);
    for _ in 0..10 {
        assert_eq!(retriever.retrieve("attention mechanism"), first);
    }
    // Both query terms appear only in the first and sixth chunks.
    let mut top_two: Vec<u32> = first[..2].iter().map(|r| r.chunk.page_number).collect();
    top_two.sort_unstable();
    assert_eq!(top_two, vec![1, 6]);
}

#[test]
fn uniform_vocabulary_keeps_index_order() {
    let corpus = vec![chunk("echo echo", 1), chunk("echo", 2), chunk("echo echo echo", 3)];
    let results = rank(&TfIdfIndex::build(corpus).unwrap(), "echo", 3);
    let pages: Vec<u32> = results.iter().map(|r| r.chunk.page_number).collect();
    assert_eq!(pages, vec![1, 2, 3]);
}

#[test]
fn concurrent_queries_share_one_retriever() {
    let corpus = vec![chunk("the cat sat on the mat", 1), chunk("dogs are loyal animals", 2)];
    let retriever = Retriever::new(corpus, 1).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = ["cat", "dogs", "mat", "loyal"]
            .into_iter()
            .map(|query| {
                let retriever = &retriever;
                scope.spawn(move || retriever.retrieve(query))
            })
            .collect();
        let pages: Vec<u32> =
            handles.into_iter().map(|h| h.join().unwrap()[0].chunk.page_number).collect();
        assert_eq!(pages, vec![1, 2, 1, 2]);
    });
}
