//! Error type definitions.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// Migration error.
    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    /// Stored JSON column could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Failure of a single hop request.
///
/// Every variant is absorbed by the analyzer into a `fetch_error` issue; none of
/// them abort a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HopError {
    /// The request did not complete within the hop timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// TCP/TLS connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The request could not be built (usually a malformed URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other transport failure.
    #[error("request failed: {0}")]
    Other(String),
}
