// Shared test helpers for spawning the API and building analyzers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::TcpListener;

use redirect_audit::initialization::{init_analyzer, init_store};
use redirect_audit::{router, AnalysisStore, AppState, Config, RedirectAnalyzer};

/// Builds a config for tests: short hop timeout, sequential batches.
#[allow(dead_code)] // Used by other test files
pub fn test_config(db_dir: &TempDir) -> Config {
    Config {
        db_path: db_dir.path().join("analyses.db"),
        timeout_seconds: 1,
        user_agent: "redirect_audit_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Builds an analyzer backed by the real reqwest transport.
#[allow(dead_code)] // Used by other test files
pub fn test_analyzer(config: &Config) -> RedirectAnalyzer {
    init_analyzer(config).expect("Failed to initialize analyzer")
}

/// Opens a SQLite store inside `db_dir`.
#[allow(dead_code)] // Used by other test files
pub async fn test_store(config: &Config) -> Arc<dyn AnalysisStore> {
    Arc::new(init_store(config).await.expect("Failed to initialize store"))
}

/// Serves the API on an ephemeral port and returns its base URL.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_app(config: &Config, store: Arc<dyn AnalysisStore>) -> String {
    let state = AppState::new(test_analyzer(config), store, config);
    let app = router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr: SocketAddr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Returns a URL on a port nothing is listening on.
#[allow(dead_code)] // Used by other test files
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    drop(listener);
    format!("http://{}/", addr)
}
