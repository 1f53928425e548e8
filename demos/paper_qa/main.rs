//! # Paper Q&A
//!
//! Answers questions about research papers from a folder of extracted text
//! files. Pages are separated by form feeds, as written by `pdftotext`.
//! Retrieval is lexical; the answer comes from Gemini and cites the pages
//! it was grounded on.
//!
//! Requires: `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) environment variable.
//!
//! Run: `cargo run --example paper_qa --features gemini -- data`

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Instant;

use paperqa_rag::{GeminiGenerator, RagConfig, RagPipeline, TextLoader};
use paperqa_demos::{init_tracing, print_contexts};

const SAMPLE_QUESTIONS: [&str; 5] = [
    "Larger models make increasingly efficient use of in-context information?",
    "what are the Applications of Attention in our Model?",
    "Aggregate performance for all 42 accuracy-denominated benchmarks",
    "Why Self-Attention",
    "what is LAMBADA",
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let folder = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());

    let generator = Arc::new(GeminiGenerator::from_env()?);
    let pipeline =
        RagPipeline::builder().config(RagConfig::default()).generator(generator).build()?;

    let pages = TextLoader::new(&folder).with_source_trailer(true).load()?;
    let session = pipeline.open_session(&pages)?;
    println!("Processed {} document chunks from {} pages!", session.chunks().len(), pages.len());
    println!("Sample questions: {}", SAMPLE_QUESTIONS.join(" | "));

    let stdin = io::stdin();
    loop {
        print!("\nAsk your question: ");
        io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            continue;
        }

        let start = Instant::now();
        match pipeline.answer(&session, question).await {
            Ok(answer) => {
                println!("\nAnswer:\n{}", answer.text);
                println!("\nSources:");
                for source in &answer.sources {
                    println!("- {source}");
                }
                println!("\nResponse time: {:.2} seconds", start.elapsed().as_secs_f64());
                println!("\nRelevant Contexts:");
                print_contexts(&answer.contexts, 500);
            }
            Err(e) => eprintln!("Error generating answer: {e}"),
        }
    }

    Ok(())
}
