//! Error handling and issue statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, storage and hop requests
//! - Categorization of transport errors
//! - Process-wide issue counters

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::IssueStats;
pub use types::{DatabaseError, HopError, InitializationError};
