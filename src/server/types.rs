//! Server state, request and response types.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyzer::{RedirectAnalysis, RedirectAnalyzer};
use crate::batch::AnalysisSummary;
use crate::error_handling::{DatabaseError, IssueStats};
use crate::storage::AnalysisStore;

/// Shared state for the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: RedirectAnalyzer,
    pub store: Arc<dyn AnalysisStore>,
    pub stats: Arc<IssueStats>,
    pub start_time: Arc<Instant>,
    /// Number of URLs analyzed at once within a batch
    pub max_concurrency: usize,
    /// Redirect cap used when a request omits `maxRedirects`
    pub default_max_redirects: usize,
}

/// Body of `POST /`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub urls: Vec<String>,
    #[serde(default)]
    pub max_redirects: Option<usize>,
}

/// Success body of `POST /`
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalyzeData,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeData {
    pub summary: AnalysisSummary,
    pub analyses: Vec<RedirectAnalysis>,
    /// Store id of the persisted batch; `null` when persistence failed
    pub analysis_id: Option<i64>,
}

/// Success envelope for read endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// JSON response for `/status`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub uptime_seconds: f64,
    pub batches: usize,
    pub urls_analyzed: usize,
    pub persistence_failures: usize,
    pub total_issues: usize,
    pub issues: BTreeMap<&'static str, usize>,
}

/// Errors surfaced to HTTP clients as `{success: false, error}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}
