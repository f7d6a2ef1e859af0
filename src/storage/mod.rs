//! PostgreSQL persistence for resolved coordinate/address pairs.

mod insert;
mod migrations;
mod pool;

// Re-export public API
pub use insert::{PgRecordStore, SaveOutcome, StoreRecords};
pub use migrations::run_migrations;
pub use pool::{init_db_pool, DbConfig};
