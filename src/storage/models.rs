//! Stored analysis records.

use serde::{Deserialize, Serialize};

use crate::analyzer::RedirectAnalysis;
use crate::batch::AnalysisSummary;

/// A batch result about to be written.
pub struct NewAnalysisRecord<'a> {
    pub analyzed_urls: &'a [String],
    pub summary: &'a AnalysisSummary,
    pub analyses: &'a [RedirectAnalysis],
    pub created_at_ms: i64,
}

/// A batch result read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    pub id: i64,
    pub analyzed_urls: Vec<String>,
    pub summary: AnalysisSummary,
    pub analyses: Vec<RedirectAnalysis>,
    /// Insert time, milliseconds since the Unix epoch
    pub created_at: i64,
}
