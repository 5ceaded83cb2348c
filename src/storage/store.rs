//! Record store abstraction.
//!
//! The HTTP handler only needs "write this batch" and "read batch N", so it
//! talks to an `AnalysisStore` rather than to SQLite directly.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::insert::insert_analysis;
use super::models::{NewAnalysisRecord, StoredAnalysis};
use super::query::fetch_analysis;
use crate::error_handling::DatabaseError;

/// Persistence sink for batch results.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Writes one batch result and returns its id.
    async fn store(&self, record: &NewAnalysisRecord<'_>) -> Result<i64, DatabaseError>;

    /// Reads a batch result back by id.
    async fn fetch(&self, id: i64) -> Result<Option<StoredAnalysis>, DatabaseError>;
}

/// `AnalysisStore` backed by the SQLite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: Arc<SqlitePool>,
}

impl SqliteStore {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for SqliteStore {
    async fn store(&self, record: &NewAnalysisRecord<'_>) -> Result<i64, DatabaseError> {
        insert_analysis(&self.pool, record).await
    }

    async fn fetch(&self, id: i64) -> Result<Option<StoredAnalysis>, DatabaseError> {
        fetch_analysis(&self.pool, id).await
    }
}
