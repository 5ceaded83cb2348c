//! Shared test helpers for storage module tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::analyzer::{Issue, IssueType, RedirectAnalysis, RedirectHop, Severity};
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
///
/// Uses a single-connection in-memory database; every extra connection to
/// `sqlite::memory:` would open a separate, empty database.
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds an analysis of `chain_length` 301 redirects ending in a 200.
pub fn sample_analysis(start_url: &str, chain_length: usize) -> RedirectAnalysis {
    let mut chain: Vec<RedirectHop> = (0..chain_length)
        .map(|i| RedirectHop {
            url: format!("{start_url}{i}"),
            status_code: 301,
            location: Some(format!("{start_url}{}", i + 1)),
            elapsed_ms: 10,
            protocol: "https:".to_string(),
        })
        .collect();
    chain.push(RedirectHop {
        url: format!("{start_url}{chain_length}"),
        status_code: 200,
        location: None,
        elapsed_ms: 10,
        protocol: "https:".to_string(),
    });

    let issues = if chain_length == 1 {
        vec![Issue::new(
            IssueType::SingleRedirect,
            Severity::Low,
            "Single redirect detected",
        )]
    } else {
        Vec::new()
    };

    RedirectAnalysis {
        start_url: start_url.to_string(),
        final_url: format!("{start_url}{chain_length}"),
        total_time_ms: 10 * chain.len() as u64,
        chain,
        chain_length,
        has_loop: false,
        loop_urls: Vec::new(),
        issues,
    }
}
