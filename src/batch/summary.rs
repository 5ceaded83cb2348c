//! Batch summary aggregation.

use serde::{Deserialize, Serialize};

use crate::analyzer::RedirectAnalysis;

/// Aggregate counts across one batch of analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_urls: usize,
    /// URLs with at least one redirect
    pub urls_with_redirects: usize,
    /// URLs with two or more redirects
    pub urls_with_chains: usize,
    pub urls_with_loops: usize,
    /// Mean chain length, rounded to the nearest integer
    pub avg_chain_length: usize,
    pub total_issues: usize,
}

/// Builds the summary for a batch.
pub fn summarize(analyses: &[RedirectAnalysis]) -> AnalysisSummary {
    let total_urls = analyses.len();
    let total_chain_length: usize = analyses.iter().map(|a| a.chain_length).sum();

    // Integer round-half-up of total / count
    let avg_chain_length = if total_urls > 0 {
        (2 * total_chain_length + total_urls) / (2 * total_urls)
    } else {
        0
    };

    AnalysisSummary {
        total_urls,
        urls_with_redirects: analyses.iter().filter(|a| a.chain_length > 0).count(),
        urls_with_chains: analyses.iter().filter(|a| a.chain_length > 1).count(),
        urls_with_loops: analyses.iter().filter(|a| a.has_loop).count(),
        avg_chain_length,
        total_issues: analyses.iter().map(|a| a.issues.len()).sum(),
    }
}
