//! Batch analysis.
//!
//! Runs the analyzer over a list of URLs with bounded concurrency. Results come
//! back in input order regardless of completion order, and because `analyze`
//! never fails, one slow or broken URL cannot abort the rest of the batch.

mod summary;

use futures::stream::{self, StreamExt};
use log::info;

use crate::analyzer::{RedirectAnalysis, RedirectAnalyzer};

pub use summary::{summarize, AnalysisSummary};

/// Analyzes every URL, at most `concurrency` at a time (1 = sequential).
pub async fn analyze_batch(
    analyzer: &RedirectAnalyzer,
    urls: &[String],
    max_redirects: usize,
    concurrency: usize,
) -> Vec<RedirectAnalysis> {
    let concurrency = concurrency.max(1);
    info!(
        "Analyzing {} URL{} (max {} redirects, concurrency {})",
        urls.len(),
        if urls.len() == 1 { "" } else { "s" },
        max_redirects,
        concurrency
    );

    stream::iter(urls.iter().cloned())
        .map(|url| {
            let analyzer = analyzer.clone();
            async move { analyzer.analyze(&url, max_redirects).await }
        })
        .buffered(concurrency)
        .collect()
        .await
}
