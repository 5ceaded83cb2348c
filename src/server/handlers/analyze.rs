//! Batch analysis handler.

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use log::{error, info};

use super::super::types::{AnalyzeData, AnalyzeRequest, AnalyzeResponse, ApiError, AppState};
use crate::batch::{analyze_batch, summarize};
use crate::config::MAX_REDIRECTS_CEILING;
use crate::storage::NewAnalysisRecord;

/// `POST /`: analyzes a batch of URLs, stores the result and returns it.
///
/// The body is parsed from raw bytes so a missing or wrong `Content-Type`
/// still yields the JSON 400 envelope rather than a plain-text rejection.
pub async fn analyze_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let request = parse_request(&body)?;
    let max_redirects = request
        .max_redirects
        .unwrap_or(state.default_max_redirects)
        .clamp(1, MAX_REDIRECTS_CEILING);

    let analyses = analyze_batch(
        &state.analyzer,
        &request.urls,
        max_redirects,
        state.max_concurrency,
    )
    .await;
    let summary = summarize(&analyses);
    state.stats.record_batch(&analyses);

    let record = NewAnalysisRecord {
        analyzed_urls: &request.urls,
        summary: &summary,
        analyses: &analyses,
        created_at_ms: chrono::Utc::now().timestamp_millis(),
    };
    let analysis_id = match state.store.store(&record).await {
        Ok(id) => {
            info!("Stored analysis {id} ({} URLs)", summary.total_urls);
            Some(id)
        }
        Err(e) => {
            // The caller still gets the results
            error!("Failed to store analysis of {} URLs: {e}", summary.total_urls);
            state.stats.record_persistence_failure();
            None
        }
    };

    let message = format!(
        "Analyzed {} URL{}",
        summary.total_urls,
        if summary.total_urls == 1 { "" } else { "s" }
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        data: AnalyzeData {
            summary,
            analyses,
            analysis_id,
        },
        message,
    }))
}

fn parse_request(body: &[u8]) -> Result<AnalyzeRequest, ApiError> {
    let request: AnalyzeRequest = serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))?;
    if request.urls.is_empty() {
        return Err(ApiError::BadRequest(
            "URLs array is required and must not be empty".to_string(),
        ));
    }
    Ok(request)
}
