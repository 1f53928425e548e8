//! # Lexical Search
//!
//! Builds a retrieval session over a handful of in-memory pages and ranks
//! sample questions against it. No API key or network access is needed.
//!
//! Run: `cargo run --example lexical_search`

use paperqa_rag::{Document, RagConfig, RagPipeline};
use paperqa_demos::{init_tracing, print_contexts};

fn sample_pages() -> Vec<Document> {
    vec![
        Document::new(
            "Attention Is All You Need\n\n\
             The dominant sequence transduction models are based on complex recurrent or \
             convolutional neural networks. We propose a new simple network architecture, \
             the Transformer, based solely on attention mechanisms.",
            "attention.txt",
            1,
        ),
        Document::new(
            "Multi-Head Attention\n\n\
             Multi-head attention allows the model to jointly attend to information from \
             different representation subspaces at different positions. With a single \
             attention head, averaging inhibits this.",
            "attention.txt",
            5,
        ),
        Document::new(
            "Why Self-Attention\n\n\
             We compare self-attention layers to recurrent and convolutional layers along \
             three criteria: total computational complexity per layer, the amount of \
             computation that can be parallelized, and the path length between long-range \
             dependencies in the network.",
            "attention.txt",
            6,
        ),
        Document::new(
            "LAMBADA\n\n\
             The LAMBADA dataset tests the modeling of long-range dependencies in text: the \
             model is asked to predict the last word of sentences which require reading a \
             paragraph of context.",
            "gpt3.txt",
            10,
        ),
        Document::new(
            "Larger models make increasingly efficient use of in-context information. \
             Few-shot performance grows more steeply with model size than zero-shot.",
            "gpt3.txt",
            3,
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RagConfig::builder().chunk_size(200).chunk_overlap(40).top_k(3).build()?;
    let pipeline = RagPipeline::builder().config(config).build()?;
    let session = pipeline.open_session(&sample_pages())?;

    let questions = [
        "Larger models make increasingly efficient use of in-context information?",
        "What are the applications of attention in our model?",
        "Why self-attention",
        "what is LAMBADA",
        "quantum chromodynamics",
    ];

    for question in questions {
        println!("=== {question}");
        print_contexts(&session.retrieve(question), 120);
    }

    Ok(())
}
