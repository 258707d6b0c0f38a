//! Bidirectional todo <-> tag index.
//!
//! Each membership lives in two sets: the forward set `tags:<id>` and the
//! reverse set `todos_by_tag:<tag>`. Every write touches both sides in one
//! atomic batch, so no reader can observe one side without the other.

use std::collections::BTreeSet;

use super::scan::collect_members;
use super::{TodoError, TodoResult};
use crate::domain::{Tag, TodoId};
use crate::infra::KeySchema;
use crate::store::{Batch, KvStore};

/// Owner of the forward and reverse tag sets.
pub struct TagIndex<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    keys: &'a KeySchema,
}

impl<'a, S: KvStore + ?Sized> TagIndex<'a, S> {
    pub fn new(kv: &'a S, keys: &'a KeySchema) -> Self {
        Self { kv, keys }
    }

    /// Attaches `tag` to `id` on both sides.
    ///
    /// Returns `false` if the tag was already attached. The caller checks
    /// that the todo exists.
    pub fn add_tag(&self, id: &TodoId, tag: &Tag) -> TodoResult<bool> {
        let mut batch = Batch::new();
        batch
            .set_add(self.keys.todo_tags_key(id), [tag.as_str()])
            .set_add(self.keys.tag_todos_key(tag.as_str()), [id.as_str()]);
        let counts = self.kv.execute(&batch)?;
        Ok(counts.first().copied().unwrap_or(0) > 0)
    }

    /// Detaches `tag` from `id` on both sides.
    ///
    /// Returns `false` if the tag was not attached.
    pub fn remove_tag(&self, id: &TodoId, tag: &Tag) -> TodoResult<bool> {
        let mut batch = Batch::new();
        batch
            .set_remove(self.keys.todo_tags_key(id), [tag.as_str()])
            .set_remove(self.keys.tag_todos_key(tag.as_str()), [id.as_str()]);
        let counts = self.kv.execute(&batch)?;
        Ok(counts.first().copied().unwrap_or(0) > 0)
    }

    /// Returns the forward set of `id`, empty if there is none.
    pub fn tags_of(&self, id: &TodoId) -> TodoResult<BTreeSet<Tag>> {
        let key = self.keys.todo_tags_key(id);
        let members = self.kv.smembers(&key)?;
        parse_tags(&key, members)
    }

    /// Returns up to `limit` ids carrying `tag`, in store order.
    pub fn todos_with_tag(
        &self,
        tag: &Tag,
        page_size: usize,
        limit: usize,
    ) -> TodoResult<Vec<TodoId>> {
        let key = self.keys.tag_todos_key(tag.as_str());
        collect_members(self.kv, &key, page_size, limit)?
            .into_iter()
            .map(|member| {
                member
                    .parse::<TodoId>()
                    .map_err(|e| TodoError::corrupt(&key, format!("{e}")))
            })
            .collect()
    }

    /// Reads the raw forward members of `id` without validating them.
    ///
    /// Cascading deletes use this so a hand-edited member is still cleaned up.
    pub(crate) fn raw_tags_of(&self, id: &TodoId) -> TodoResult<BTreeSet<String>> {
        Ok(self.kv.smembers(&self.keys.todo_tags_key(id))?)
    }

    /// Stages removal of every tag footprint of `id` into `batch`.
    pub(crate) fn stage_detach_all(
        &self,
        batch: &mut Batch,
        id: &TodoId,
        tags: &BTreeSet<String>,
    ) {
        batch.delete(self.keys.todo_tags_key(id));
        for tag in tags {
            batch.set_remove(self.keys.tag_todos_key(tag), [id.as_str()]);
        }
    }
}

/// Parses stored forward-set members, treating bad ones as corruption.
pub(crate) fn parse_tags(key: &str, members: BTreeSet<String>) -> TodoResult<BTreeSet<Tag>> {
    members
        .into_iter()
        .map(|member| Tag::new(&member).map_err(|e| TodoError::corrupt(key, e.to_string())))
        .collect()
}
