//! SQLite-backed key-value store implementation.

mod connection;
mod kv_impl;
mod transaction;


use rusqlite::Connection;
use std::sync::Mutex;

use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed key-value store.
///
/// The connection sits behind a mutex so one store value can be shared by
/// every caller; SQLite serializes writers exactly like a single-threaded
/// store server would.
pub struct SqliteStore {
    pub(crate) conn: Mutex<Connection>,
}
