//! Analysis record lookup.

use sqlx::{Row, SqlitePool};

use super::models::StoredAnalysis;
use crate::batch::AnalysisSummary;
use crate::error_handling::DatabaseError;

/// Loads a stored batch result by id.
pub async fn fetch_analysis(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<StoredAnalysis>, DatabaseError> {
    let row = sqlx::query(
        "SELECT id, analyzed_urls, total_urls, urls_with_redirects, urls_with_chains,
                urls_with_loops, avg_chain_length, total_issues, analyses, created_at
         FROM redirect_analyses WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let analyzed_urls: String = row.get("analyzed_urls");
    let analyses: String = row.get("analyses");

    Ok(Some(StoredAnalysis {
        id: row.get("id"),
        analyzed_urls: serde_json::from_str(&analyzed_urls)?,
        summary: AnalysisSummary {
            total_urls: to_usize(row.get("total_urls")),
            urls_with_redirects: to_usize(row.get("urls_with_redirects")),
            urls_with_chains: to_usize(row.get("urls_with_chains")),
            urls_with_loops: to_usize(row.get("urls_with_loops")),
            avg_chain_length: to_usize(row.get("avg_chain_length")),
            total_issues: to_usize(row.get("total_issues")),
        },
        analyses: serde_json::from_str(&analyses)?,
        created_at: row.get("created_at"),
    }))
}

fn to_usize(value: i64) -> usize {
    usize::try_from(value).unwrap_or(0)
}
