//! HTTP endpoint for batch redirect analysis.
//!
//! Routes:
//! - `POST /` - analyze a batch of URLs
//! - `GET /analyses/{id}` - fetch a stored batch result
//! - `GET /status` - counters since startup
//!
//! `OPTIONS` requests on any route are answered by the CORS layer.

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::http::{HeaderName, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::analyzer::RedirectAnalyzer;
use crate::config::{Config, CORS_ALLOWED_HEADERS};
use crate::error_handling::IssueStats;
use crate::storage::AnalysisStore;

use handlers::{analyze_handler, get_analysis_handler, status_handler};
pub use types::{
    AnalyzeData, AnalyzeRequest, AnalyzeResponse, ApiError, AppState, DataResponse,
    StatusResponse,
};

impl AppState {
    /// Builds handler state from the analyzer, the store and the batch settings in `config`.
    pub fn new(analyzer: RedirectAnalyzer, store: Arc<dyn AnalysisStore>, config: &Config) -> Self {
        Self {
            analyzer,
            store,
            stats: Arc::new(IssueStats::new()),
            start_time: Arc::new(Instant::now()),
            max_concurrency: config.max_concurrency.max(1),
            default_max_redirects: config.default_max_redirects,
        }
    }
}

/// Builds the application router with CORS applied to every route.
///
/// The CORS layer answers every `OPTIONS` request itself, so no route handles it.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(CORS_ALLOWED_HEADERS.map(HeaderName::from_static));

    Router::new()
        .route("/", post(analyze_handler))
        .route("/analyses/{id}", get(get_analysis_handler))
        .route("/status", get(status_handler))
        .layer(cors)
        .with_state(state)
}

/// Binds `listen` and serves until Ctrl-C.
pub async fn start_server(listen: SocketAddr, state: AppState) -> Result<(), anyhow::Error> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", listen, e))?;

    log::info!("Redirect analysis endpoint listening on http://{}/", listen);
    log::info!("  - Analyze: POST http://{}/", listen);
    log::info!("  - Stored analyses: GET http://{}/analyses/{{id}}", listen);
    log::info!("  - Status: GET http://{}/status", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received, stopping server");
}
