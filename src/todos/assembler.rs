//! Fan-out/fan-in reads that turn id lists into fully populated todos.

use super::tag_index::parse_tags;
use super::{TodoError, TodoResult};
use crate::domain::{Todo, TodoId};
use crate::infra::{KeySchema, decode};
use crate::store::KvStore;

/// Stateless combinator over the store's multi-key reads.
///
/// Each chunk of up to `max_batch` ids costs exactly two round trips: one
/// `mget` for the records and one pipelined read of the forward tag sets.
pub struct BatchAssembler<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    keys: &'a KeySchema,
    max_batch: usize,
}

impl<'a, S: KvStore + ?Sized> BatchAssembler<'a, S> {
    pub fn new(kv: &'a S, keys: &'a KeySchema, max_batch: usize) -> Self {
        Self {
            kv,
            keys,
            max_batch: max_batch.max(1),
        }
    }

    /// Fetches records and tags for `ids`, preserving input order.
    ///
    /// Ids whose record has vanished since they were read from an index are
    /// dropped silently.
    pub fn assemble(&self, ids: &[TodoId]) -> TodoResult<Vec<Todo>> {
        let mut todos = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(self.max_batch) {
            self.assemble_chunk(chunk, &mut todos)?;
        }
        Ok(todos)
    }

    fn assemble_chunk(&self, ids: &[TodoId], out: &mut Vec<Todo>) -> TodoResult<()> {
        let item_keys: Vec<String> = ids.iter().map(|id| self.keys.item_key(id)).collect();
        let tag_keys: Vec<String> = ids.iter().map(|id| self.keys.todo_tags_key(id)).collect();

        let records = self.kv.mget(&item_keys)?;
        let tag_sets = self.kv.smembers_many(&tag_keys)?;

        for (((id, item_key), record), (tag_key, tags)) in ids
            .iter()
            .zip(&item_keys)
            .zip(records)
            .zip(tag_keys.iter().zip(tag_sets))
        {
            let Some(bytes) = record else {
                tracing::debug!(%id, "record vanished before fetch, skipping");
                continue;
            };
            let todo = decode(&bytes).map_err(|source| TodoError::Decode {
                key: item_key.clone(),
                source,
            })?;
            out.push(todo.with_tags(parse_tags(tag_key, tags)?));
        }
        Ok(())
    }
}
