//! Primary index and per-record storage.

use super::assembler::BatchAssembler;
use super::limits::Limits;
use super::scan::collect_members;
use super::tag_index::TagIndex;
use super::{TodoError, TodoResult};
use crate::domain::{Tag, Todo, TodoId};
use crate::infra::{KeySchema, decode, encode};
use crate::store::{Batch, KvStore};

/// CRUD over todo records.
///
/// Owns the primary index (`<ns>index`) and the records (`<ns>item:<id>`).
/// Tag sets are reached through [`TagIndex`].
pub struct TodoStore<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    keys: &'a KeySchema,
    limits: Limits,
}

impl<'a, S: KvStore + ?Sized> TodoStore<'a, S> {
    pub fn new(kv: &'a S, keys: &'a KeySchema, limits: Limits) -> Self {
        Self { kv, keys, limits }
    }

    /// The tag index over the same store and namespace.
    pub fn tags(&self) -> TagIndex<'a, S> {
        TagIndex::new(self.kv, self.keys)
    }

    fn assembler(&self) -> BatchAssembler<'a, S> {
        BatchAssembler::new(self.kv, self.keys, self.limits.list_limit)
    }

    /// Writes the record and indexes its id in one atomic batch.
    ///
    /// Re-saving an id overwrites the record; the index is a set so it is
    /// left unchanged. Tags are not touched.
    pub fn save(&self, todo: &Todo) -> TodoResult<()> {
        let bytes = encode(todo).map_err(|source| TodoError::Encode {
            id: todo.id().to_string(),
            source,
        })?;
        let mut batch = Batch::new();
        batch
            .set_add(self.keys.index_key(), [todo.id().as_str()])
            .set(self.keys.item_key(todo.id()), bytes);
        self.kv.execute(&batch)?;
        Ok(())
    }

    /// Reads a record and resolves its tags.
    ///
    /// Stale tag data for a missing record never resurrects it.
    pub fn get(&self, id: &TodoId) -> TodoResult<Option<Todo>> {
        let key = self.keys.item_key(id);
        let Some(bytes) = self.kv.get(&key)? else {
            return Ok(None);
        };
        let todo = decode(&bytes).map_err(|source| TodoError::Decode { key, source })?;
        let tags = self.tags().tags_of(id)?;
        Ok(Some(todo.with_tags(tags)))
    }

    /// Checks that a record exists without decoding it.
    pub fn exists(&self, id: &TodoId) -> TodoResult<bool> {
        Ok(self.kv.get(&self.keys.item_key(id))?.is_some())
    }

    /// Removes a todo and every tag footprint it has.
    ///
    /// The forward set is read first, then the index entry, the record,
    /// the forward set and each reverse membership go in one atomic batch.
    /// Returns whether a record was present; deleting twice is not an error.
    pub fn delete(&self, id: &TodoId) -> TodoResult<bool> {
        let tag_index = self.tags();
        let tags = tag_index.raw_tags_of(id)?;

        let mut batch = Batch::new();
        batch
            .set_remove(self.keys.index_key(), [id.as_str()])
            .delete(self.keys.item_key(id));
        tag_index.stage_detach_all(&mut batch, id, &tags);

        let counts = self.kv.execute(&batch)?;
        let existed = counts.get(1).copied().unwrap_or(0) > 0;
        tracing::debug!(%id, existed, tags = tags.len(), "deleted todo");
        Ok(existed)
    }

    /// Lists up to `limit` todos in store order.
    ///
    /// The index is scanned in pages until `limit` ids are collected or it
    /// runs out.
    pub fn list(&self, limit: usize) -> TodoResult<Vec<Todo>> {
        let ids = self.index_ids(limit)?;
        self.assembler().assemble(&ids)
    }

    /// Lists up to `limit` todos carrying `tag`, with all their tags.
    pub fn list_by_tag(&self, tag: &Tag, limit: usize) -> TodoResult<Vec<Todo>> {
        let ids = self
            .tags()
            .todos_with_tag(tag, self.limits.scan_page_size, limit)?;
        self.assembler().assemble(&ids)
    }

    fn index_ids(&self, limit: usize) -> TodoResult<Vec<TodoId>> {
        let key = self.keys.index_key();
        collect_members(self.kv, &key, self.limits.scan_page_size, limit)?
            .into_iter()
            .map(|member| {
                member
                    .parse::<TodoId>()
                    .map_err(|e| TodoError::corrupt(&key, format!("{e}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Tag, TodoDraft};
    use crate::store::SqliteStore;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    struct Fixture {
        kv: SqliteStore,
        keys: KeySchema,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                kv: SqliteStore::open_in_memory().unwrap(),
                keys: KeySchema::default(),
            }
        }

        fn store(&self) -> TodoStore<'_, SqliteStore> {
            TodoStore::new(&self.kv, &self.keys, Limits::default())
        }

        fn index_members(&self) -> BTreeSet<String> {
            self.kv.smembers(&self.keys.index_key()).unwrap()
        }
    }

    fn new_todo(title: &str) -> Todo {
        Todo::create(TodoDraft::new(title, false).unwrap())
    }

    fn tag(s: &str) -> Tag {
        Tag::new(s).unwrap()
    }

    // ===========================================
    // save / get
    // ===========================================

    #[test]
    fn save_then_get_roundtrips() {
        let fx = Fixture::new();
        let store = fx.store();
        let todo = new_todo("Buy milk");

        store.save(&todo).unwrap();

        assert_eq!(store.get(todo.id()).unwrap(), Some(todo.clone()));
        assert_eq!(fx.index_members(), BTreeSet::from([todo.id().to_string()]));
    }

    #[test]
    fn resave_overwrites_record_and_keeps_single_index_entry() {
        let fx = Fixture::new();
        let store = fx.store();
        let mut todo = new_todo("Original");
        store.save(&todo).unwrap();

        todo.apply(TodoDraft::new("Updated", true).unwrap());
        store.save(&todo).unwrap();

        let fetched = store.get(todo.id()).unwrap().unwrap();
        assert_eq!(fetched.title(), "Updated");
        assert!(fetched.done());
        assert_eq!(fx.index_members().len(), 1);
    }

    #[test]
    fn save_leaves_tags_alone() {
        let fx = Fixture::new();
        let store = fx.store();
        let mut todo = new_todo("Tagged");
        store.save(&todo).unwrap();
        store.tags().add_tag(todo.id(), &tag("work")).unwrap();

        todo.apply(TodoDraft::new("Renamed", false).unwrap());
        store.save(&todo).unwrap();

        let fetched = store.get(todo.id()).unwrap().unwrap();
        assert_eq!(fetched.tags(), &BTreeSet::from([tag("work")]));
    }

    #[test]
    fn get_missing_is_none_even_with_stale_tags() {
        let fx = Fixture::new();
        let store = fx.store();
        let ghost: TodoId = "ghost".parse().unwrap();
        store.tags().add_tag(&ghost, &tag("stale")).unwrap();

        assert_eq!(store.get(&ghost).unwrap(), None);
    }

    #[test]
    fn get_corrupt_record_is_a_fault() {
        let fx = Fixture::new();
        let id: TodoId = "bad".parse().unwrap();
        let mut batch = Batch::new();
        batch.set(fx.keys.item_key(&id), vec![1, 255, 255]);
        fx.kv.execute(&batch).unwrap();

        let err = fx.store().get(&id).unwrap_err();
        assert!(matches!(err, TodoError::Decode { .. }));
    }

    // ===========================================
    // delete
    // ===========================================

    #[test]
    fn delete_cascades_to_every_tag() {
        let fx = Fixture::new();
        let store = fx.store();
        let todo = new_todo("Doomed");
        let other = new_todo("Survivor");
        store.save(&todo).unwrap();
        store.save(&other).unwrap();
        for name in ["a", "b", "c"] {
            store.tags().add_tag(todo.id(), &tag(name)).unwrap();
        }
        store.tags().add_tag(other.id(), &tag("a")).unwrap();

        assert!(store.delete(todo.id()).unwrap());

        assert_eq!(store.get(todo.id()).unwrap(), None);
        assert!(store.tags().tags_of(todo.id()).unwrap().is_empty());
        for name in ["a", "b", "c"] {
            let ids = store.tags().todos_with_tag(&tag(name), 256, 500).unwrap();
            assert!(!ids.contains(todo.id()), "orphan left under tag {name}");
        }
        assert_eq!(
            store.tags().todos_with_tag(&tag("a"), 256, 500).unwrap(),
            vec![other.id().clone()]
        );
        assert_eq!(fx.index_members(), BTreeSet::from([other.id().to_string()]));
    }

    #[test]
    fn delete_twice_is_idempotent() {
        let fx = Fixture::new();
        let store = fx.store();
        let todo = new_todo("Once");
        store.save(&todo).unwrap();
        store.tags().add_tag(todo.id(), &tag("x")).unwrap();

        assert!(store.delete(todo.id()).unwrap());
        assert!(!store.delete(todo.id()).unwrap());

        assert!(fx.index_members().is_empty());
        assert!(store.tags().todos_with_tag(&tag("x"), 256, 500).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_stale_tags_of_missing_record() {
        let fx = Fixture::new();
        let store = fx.store();
        let ghost: TodoId = "ghost".parse().unwrap();
        store.tags().add_tag(&ghost, &tag("stale")).unwrap();

        assert!(!store.delete(&ghost).unwrap());
        assert!(store.tags().todos_with_tag(&tag("stale"), 256, 500).unwrap().is_empty());
    }

    // ===========================================
    // list
    // ===========================================

    #[test]
    fn list_returns_every_todo_with_tags() {
        let fx = Fixture::new();
        let store = fx.store();
        let a = new_todo("A");
        let b = new_todo("B");
        store.save(&a).unwrap();
        store.save(&b).unwrap();
        store.tags().add_tag(a.id(), &tag("urgent")).unwrap();

        let listed = store.list(500).unwrap();

        assert_eq!(listed.len(), 2);
        let listed_a = listed.iter().find(|t| t.id() == a.id()).unwrap();
        assert_eq!(listed_a.tags(), &BTreeSet::from([tag("urgent")]));
    }

    #[test]
    fn list_is_capped_at_limit() {
        let fx = Fixture::new();
        let store = TodoStore::new(
            &fx.kv,
            &fx.keys,
            Limits {
                scan_page_size: 4,
                list_limit: 500,
            },
        );
        for i in 0..15 {
            store.save(&new_todo(&format!("todo {i}"))).unwrap();
        }

        assert_eq!(store.list(10).unwrap().len(), 10);
        assert_eq!(store.list(500).unwrap().len(), 15);
    }

    #[test]
    fn list_skips_index_entries_without_records() {
        let fx = Fixture::new();
        let store = fx.store();
        let todo = new_todo("Real");
        store.save(&todo).unwrap();
        let mut batch = Batch::new();
        batch.set_add(fx.keys.index_key(), ["dangling"]);
        fx.kv.execute(&batch).unwrap();

        assert_eq!(store.list(500).unwrap(), vec![todo]);
    }

    #[test]
    fn list_empty_store() {
        let fx = Fixture::new();
        assert!(fx.store().list(500).unwrap().is_empty());
    }

    #[test]
    fn list_by_tag_resolves_all_tags() {
        let fx = Fixture::new();
        let store = fx.store();
        let todo = new_todo("Tagged");
        let untagged = new_todo("Plain");
        store.save(&todo).unwrap();
        store.save(&untagged).unwrap();
        store.tags().add_tag(todo.id(), &tag("urgent")).unwrap();
        store.tags().add_tag(todo.id(), &tag("work")).unwrap();

        let found = store.list_by_tag(&tag("urgent"), 500).unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), todo.id());
        assert_eq!(found[0].tags(), &BTreeSet::from([tag("urgent"), tag("work")]));
    }

    #[test]
    fn namespaces_do_not_collide() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let first = KeySchema::new("one:");
        let second = KeySchema::new("two:");
        let store_one = TodoStore::new(&kv, &first, Limits::default());
        let store_two = TodoStore::new(&kv, &second, Limits::default());

        let todo = new_todo("Only in one");
        store_one.save(&todo).unwrap();

        assert_eq!(store_one.list(500).unwrap().len(), 1);
        assert!(store_two.list(500).unwrap().is_empty());
        assert_eq!(store_two.get(todo.id()).unwrap(), None);
    }
}
