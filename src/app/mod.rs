//! Main application modules.
//!
//! This module provides the `check` command flow along with URL validation,
//! input reading and statistics printing used by the binary.

pub mod check;
pub mod input;
pub mod statistics;
pub mod url;

// Re-export public API
pub use check::{exceeds_threshold, run_check};
pub use input::read_url_lines;
pub use url::validate_and_normalize_url;
