//! Stored analysis lookup handler.

use axum::extract::{Path, State};
use axum::Json;

use super::super::types::{ApiError, AppState, DataResponse};
use crate::storage::StoredAnalysis;

/// `GET /analyses/{id}`: returns a previously stored batch result.
///
/// The id is parsed here rather than by the `Path` extractor so a malformed id
/// gets the JSON error envelope.
pub async fn get_analysis_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DataResponse<StoredAnalysis>>, ApiError> {
    let id = parse_id(&raw_id)?;
    match state.store.fetch(id).await? {
        Some(stored) => Ok(Json(DataResponse {
            success: true,
            data: stored,
        })),
        None => Err(ApiError::NotFound(format!("Analysis {id} not found"))),
    }
}

fn parse_id(raw_id: &str) -> Result<i64, ApiError> {
    raw_id
        .parse::<i64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid analysis id: {raw_id}")))
}
