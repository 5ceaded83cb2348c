// storage/mod.rs
// Database operations module

pub mod insert;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use insert::insert_analysis;
pub use migrations::run_migrations;
pub use models::{NewAnalysisRecord, StoredAnalysis};
pub use pool::init_db_pool_with_path;
pub use query::fetch_analysis;
pub use store::{AnalysisStore, SqliteStore};
