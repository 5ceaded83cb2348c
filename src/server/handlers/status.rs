//! JSON status handler.

use axum::extract::State;
use axum::Json;
use strum::IntoEnumIterator;

use super::super::types::{AppState, StatusResponse};
use crate::analyzer::IssueType;

/// Counters accumulated since the server started
pub async fn status_handler(State(state): State<AppState>) -> Json<StatusResponse> {
    let issues = IssueType::iter()
        .map(|issue_type| (issue_type.as_str(), state.stats.get_issue_count(issue_type)))
        .collect();

    Json(StatusResponse {
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        batches: state.stats.batches(),
        urls_analyzed: state.stats.urls(),
        persistence_failures: state.stats.persistence_failures(),
        total_issues: state.stats.total_issues(),
        issues,
    })
}
