//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, redirect limits, and classification thresholds.

use std::time::Duration;

/// Default SQLite database path for stored analyses.
pub const DB_PATH: &str = "./redirect_audit.db";

/// Default address the HTTP endpoint binds to.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8787";

/// Per-hop request timeout in seconds.
/// Each hop is attempted once; a timeout becomes a `fetch_error` issue.
pub const HOP_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent header for hop requests.
pub const DEFAULT_USER_AGENT: &str = concat!("redirect_audit/", env!("CARGO_PKG_VERSION"));

// Redirect handling
/// Maximum number of redirect hops followed when the caller does not say otherwise.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Upper bound accepted for a caller-supplied `maxRedirects`.
pub const MAX_REDIRECTS_CEILING: usize = 50;

/// Number of URLs analyzed at once within a batch (1 = strictly sequential).
pub const DEFAULT_MAX_CONCURRENCY: usize = 1;

// Chain classification thresholds
/// Total chain time above which a `slow_redirects` issue is raised.
pub const SLOW_CHAIN_THRESHOLD: Duration = Duration::from_millis(1000);
/// Total chain time above which `slow_redirects` becomes high severity.
pub const VERY_SLOW_CHAIN_THRESHOLD: Duration = Duration::from_millis(3000);
/// Chain length above which a chain is classified as long.
pub const LONG_CHAIN_THRESHOLD: usize = 3;

/// Maximum input URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;
