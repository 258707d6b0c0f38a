//! Bounded set enumeration.

use crate::store::{KvStore, ScanCursor, StoreResult};

/// Collects up to `limit` members of a set, `page_size` at a time.
///
/// Stops as soon as `limit` members are in hand or the set is exhausted.
pub(crate) fn collect_members<S: KvStore + ?Sized>(
    kv: &S,
    key: &str,
    page_size: usize,
    limit: usize,
) -> StoreResult<Vec<String>> {
    let mut members = Vec::new();
    let mut cursor = ScanCursor::Start;
    while members.len() < limit {
        let page = kv.sscan(key, &cursor, page_size)?;
        members.extend(page.members);
        match page.next {
            Some(next) => cursor = next,
            None => break,
        }
    }
    members.truncate(limit);
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{Batch, SqliteStore};

    fn store_with(n: usize) -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        let mut batch = Batch::new();
        batch.set_add("s", (0..n).map(|i| format!("m{i:03}")));
        store.execute(&batch).unwrap();
        store
    }

    #[test]
    fn collects_everything_under_limit() {
        let store = store_with(7);
        assert_eq!(collect_members(&store, "s", 3, 100).unwrap().len(), 7);
    }

    #[test]
    fn truncates_to_limit_mid_page() {
        let store = store_with(20);
        let members = collect_members(&store, "s", 6, 10).unwrap();
        assert_eq!(members.len(), 10);
    }

    #[test]
    fn empty_set() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(collect_members(&store, "s", 256, 500).unwrap().is_empty());
    }
}
