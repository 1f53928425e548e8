//! Shared helpers for the paperqa demos.

use paperqa_rag::SearchResult;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Shorten `text` to `max_chars` characters, marking the cut with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Print ranked contexts the way the demos display them.
pub fn print_contexts(results: &[SearchResult], max_chars: usize) {
    for (i, result) in results.iter().enumerate() {
        println!(
            "Context {} from {} (Page {}), score {:.3}:",
            i + 1,
            result.chunk.filename,
            result.chunk.page_number,
            result.score
        );
        println!("{}\n", preview(&result.chunk.text, max_chars));
    }
}
