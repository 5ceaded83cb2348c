//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP client for hop requests
//! - Logger
//! - Redirect analyzer and record store
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::analyzer::{RedirectAnalyzer, ReqwestTransport};
use crate::config::Config;
use crate::storage::{init_db_pool_with_path, run_migrations, SqliteStore};

// Re-export public API
pub use client::init_redirect_client;
pub use logger::init_logger_with;

/// Builds a redirect analyzer backed by a reqwest client with redirects disabled.
pub fn init_analyzer(config: &Config) -> Result<RedirectAnalyzer> {
    let client = init_redirect_client(config).context("Failed to initialize HTTP client")?;
    Ok(RedirectAnalyzer::new(Arc::new(ReqwestTransport::new(
        client,
    ))))
}

/// Opens (creating if needed) the SQLite store at `config.db_path` and applies migrations.
pub async fn init_store(config: &Config) -> Result<SqliteStore> {
    let pool = init_db_pool_with_path(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;
    Ok(SqliteStore::new(pool))
}
