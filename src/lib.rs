//! redirect_audit library: HTTP redirect chain analysis
//!
//! This library follows redirect chains hop by hop (no automatic redirect
//! following), records every hop with its status and timing, and flags loops,
//! HTTPS-to-HTTP downgrades, broken or error responses, and long or slow chains.
//! Batches of URLs can be analyzed directly, through the `check` command, or
//! through the HTTP endpoint, which also stores each batch in SQLite.
//!
//! # Example
//!
//! ```no_run
//! use redirect_audit::initialization::init_analyzer;
//! use redirect_audit::{analyze_batch, summarize, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let analyzer = init_analyzer(&config)?;
//!
//! let urls = vec!["http://example.com/".to_string()];
//! let analyses = analyze_batch(&analyzer, &urls, 10, 1).await;
//! let summary = summarize(&analyses);
//! println!(
//!     "{} of {} URLs redirected, {} issues",
//!     summary.urls_with_redirects, summary.total_urls, summary.total_issues
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod analyzer;
pub mod app;
pub mod batch;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod server;
pub mod storage;

// Re-export public API
pub use analyzer::{
    Issue, IssueType, RedirectAnalysis, RedirectAnalyzer, RedirectHop, Severity,
};
pub use batch::{analyze_batch, summarize, AnalysisSummary};
pub use config::{Config, FailOn, LogFormat, LogLevel};
pub use server::{router, start_server, AppState};
pub use storage::{init_db_pool_with_path, run_migrations, AnalysisStore, SqliteStore};
