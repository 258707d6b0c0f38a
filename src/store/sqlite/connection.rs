//! Connection management for SqliteStore.

use super::SqliteStore;
use crate::store::{StoreError, StoreResult, create_schema, get_schema_version};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// Default time a caller waits on a locked database before giving up.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory store.
    ///
    /// This is useful for testing; the data disappears with the value.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist and switches the
    /// database to WAL so readers never wait on a writer.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::open_with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens a store, failing with [`StoreError::Unavailable`] when the
    /// database stays locked longer than `timeout`.
    pub fn open_with_timeout(path: &Path, timeout: Duration) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(timeout)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        create_schema(&conn)?;
        let schema_version = get_schema_version(&conn)?;
        tracing::debug!(path = %path.display(), journal_mode = %mode, schema_version, "opened store");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // ===========================================
    // Connection Access
    // ===========================================

    /// Locks the connection for one round trip.
    pub(crate) fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }
}
