//! Analysis record insertion.

use sqlx::{Row, SqlitePool};

use super::models::NewAnalysisRecord;
use crate::error_handling::DatabaseError;

/// Inserts one batch result into `redirect_analyses` and returns its id.
///
/// The URL list and the analyses are stored as JSON text columns; the summary
/// counts get their own columns so they can be queried directly.
pub async fn insert_analysis(
    pool: &SqlitePool,
    record: &NewAnalysisRecord<'_>,
) -> Result<i64, DatabaseError> {
    let analyzed_urls = serde_json::to_string(record.analyzed_urls)?;
    let analyses = serde_json::to_string(record.analyses)?;
    let summary = record.summary;

    let row = sqlx::query(
        "INSERT INTO redirect_analyses (
            analyzed_urls, total_urls, urls_with_redirects, urls_with_chains,
            urls_with_loops, avg_chain_length, total_issues, analyses, created_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id",
    )
    .bind(analyzed_urls)
    .bind(to_i64(summary.total_urls))
    .bind(to_i64(summary.urls_with_redirects))
    .bind(to_i64(summary.urls_with_chains))
    .bind(to_i64(summary.urls_with_loops))
    .bind(to_i64(summary.avg_chain_length))
    .bind(to_i64(summary.total_issues))
    .bind(analyses)
    .bind(record.created_at_ms)
    .fetch_one(pool)
    .await?;

    Ok(row.get::<i64, _>(0))
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
