//! KvStore trait implementation for SqliteStore.

use super::SqliteStore;
use super::transaction::{Behavior, Transaction};
use crate::store::{Batch, BatchOp, KvStore, ScanCursor, ScanPage, StoreResult};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;

fn read_members(conn: &Connection, key: &str) -> rusqlite::Result<BTreeSet<String>> {
    let mut stmt = conn.prepare_cached("SELECT member FROM kv_sets WHERE key = ?1")?;
    let members = stmt
        .query_map([key], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<BTreeSet<String>>>()?;
    Ok(members)
}

fn apply_op(tx: &Transaction<'_>, op: &BatchOp) -> StoreResult<usize> {
    match op {
        BatchOp::Set { key, value } => {
            // A plain write replaces a set stored under the same key.
            tx.execute("DELETE FROM kv_sets WHERE key = ?1", [key])?;
            tx.execute(
                "INSERT INTO kv_values (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )?;
            Ok(1)
        }
        BatchOp::Delete { key } => {
            let values = tx.execute("DELETE FROM kv_values WHERE key = ?1", [key])?;
            let members = tx.execute("DELETE FROM kv_sets WHERE key = ?1", [key])?;
            Ok(usize::from(values > 0 || members > 0))
        }
        BatchOp::SetAdd { key, members } => {
            let mut stmt = tx
                .conn()
                .prepare_cached("INSERT OR IGNORE INTO kv_sets (key, member) VALUES (?1, ?2)")?;
            let mut added = 0;
            for member in members {
                added += stmt.execute(params![key, member])?;
            }
            Ok(added)
        }
        BatchOp::SetRemove { key, members } => {
            let mut stmt = tx
                .conn()
                .prepare_cached("DELETE FROM kv_sets WHERE key = ?1 AND member = ?2")?;
            let mut removed = 0;
            for member in members {
                removed += stmt.execute(params![key, member])?;
            }
            Ok(removed)
        }
    }
}

impl KvStore for SqliteStore {
    fn ping(&self) -> StoreResult<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let conn = self.lock()?;
        let value = conn
            .prepare_cached("SELECT value FROM kv_values WHERE key = ?1")?
            .query_row([key], |row| row.get::<_, Vec<u8>>(0))
            .optional()?;
        Ok(value)
    }

    fn mget(&self, keys: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let tx = Transaction::begin(&conn, Behavior::Deferred)?;
        let values = {
            let mut stmt = tx
                .conn()
                .prepare_cached("SELECT value FROM kv_values WHERE key = ?1")?;
            keys.iter()
                .map(|key| stmt.query_row([key], |row| row.get::<_, Vec<u8>>(0)).optional())
                .collect::<rusqlite::Result<Vec<_>>>()?
        };
        tx.commit()?;
        tracing::trace!(keys = keys.len(), "mget");
        Ok(values)
    }

    fn smembers(&self, key: &str) -> StoreResult<BTreeSet<String>> {
        let conn = self.lock()?;
        Ok(read_members(&conn, key)?)
    }

    fn smembers_many(&self, keys: &[String]) -> StoreResult<Vec<BTreeSet<String>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let tx = Transaction::begin(&conn, Behavior::Deferred)?;
        let sets = keys
            .iter()
            .map(|key| read_members(tx.conn(), key))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tx.commit()?;
        tracing::trace!(keys = keys.len(), "smembers_many");
        Ok(sets)
    }

    fn sscan(&self, key: &str, cursor: &ScanCursor, count: usize) -> StoreResult<ScanPage> {
        let count = count.max(1);
        let conn = self.lock()?;
        let members = match cursor {
            ScanCursor::Start => conn
                .prepare_cached(
                    "SELECT member FROM kv_sets WHERE key = ?1 ORDER BY member LIMIT ?2",
                )?
                .query_map(params![key, count as i64], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?,
            ScanCursor::After(last) => conn
                .prepare_cached(
                    "SELECT member FROM kv_sets WHERE key = ?1 AND member > ?2
                     ORDER BY member LIMIT ?3",
                )?
                .query_map(params![key, last, count as i64], |row| {
                    row.get::<_, String>(0)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?,
        };

        let next = if members.len() < count {
            None
        } else {
            members.last().cloned().map(ScanCursor::After)
        };
        Ok(ScanPage { members, next })
    }

    fn execute(&self, batch: &Batch) -> StoreResult<Vec<usize>> {
        if batch.is_empty() {
            return Ok(Vec::new());
        }
        let conn = self.lock()?;
        let tx = Transaction::begin(&conn, Behavior::Immediate)?;
        let counts = batch
            .ops()
            .iter()
            .map(|op| apply_op(&tx, op))
            .collect::<StoreResult<Vec<_>>>()?;
        tx.commit()?;
        tracing::debug!(ops = batch.len(), "batch committed");
        Ok(counts)
    }
}
