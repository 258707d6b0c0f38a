//! Key-value store abstraction and its SQLite backend

mod kv;
mod schema;
mod sqlite;

pub use kv::{Batch, BatchOp, KvStore, ScanCursor, ScanPage, StoreError, StoreResult};
pub(crate) use schema::{create_schema, get_schema_version};
pub use sqlite::SqliteStore;
