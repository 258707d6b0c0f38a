//! SQLite schema backing the key-value store.

use rusqlite::Connection;

/// Current schema version.
pub(crate) const SCHEMA_VERSION: i64 = 1;

/// Creates the key-value tables.
///
/// Idempotent - calling it multiple times is safe.
///
/// # Tables Created
/// - `kv_values` - plain string keys holding binary values
/// - `kv_sets` - set-typed keys, one row per member
/// - `schema_version` - Schema version tracking
pub(crate) fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv_values (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL
        ) WITHOUT ROWID;",
    )?;

    // The composite primary key is what gives set members their uniqueness.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS kv_sets (
            key TEXT NOT NULL,
            member TEXT NOT NULL,
            PRIMARY KEY (key, member)
        ) WITHOUT ROWID;",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the current schema version.
pub(crate) fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
