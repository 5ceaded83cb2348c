//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::analyzer::IssueType;
use crate::batch::AnalysisSummary;
use crate::error_handling::IssueStats;

/// Prints a one-line summary of a finished batch.
pub fn print_simple_summary(summary: &AnalysisSummary, elapsed_seconds: f64) {
    info!(
        "✅ Analyzed {} URL{} ({} redirected, {} chains, {} loops, {} issues) in {:.1}s",
        summary.total_urls,
        if summary.total_urls == 1 { "" } else { "s" },
        summary.urls_with_redirects,
        summary.urls_with_chains,
        summary.urls_with_loops,
        summary.total_issues,
        elapsed_seconds
    );
}

/// Prints per-type issue counts to the log.
pub fn print_issue_statistics(stats: &IssueStats) {
    let total = stats.total_issues();
    if total == 0 {
        return;
    }

    info!("Issue Counts ({} total):", total);
    for issue_type in IssueType::iter() {
        let count = stats.get_issue_count(issue_type);
        if count > 0 {
            info!("   {}: {}", issue_type.as_str(), count);
        }
    }
}
