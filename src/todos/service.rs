//! Entity-level operations: validation, not-found handling and logging
//! in front of the todo store and tag index.

use std::collections::BTreeSet;

use super::TodoResult;
use super::limits::Limits;
use super::todo_store::TodoStore;
use crate::domain::{Tag, Todo, TodoDraft, TodoId, UserName};
use crate::infra::KeySchema;
use crate::store::KvStore;

/// Long-lived entry point for todo operations.
///
/// Every input is validated before the store is touched. A missing todo is
/// reported as `None` (or `false` for delete), never as an error.
pub struct TodoService<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    store: TodoStore<'a, S>,
    limits: Limits,
    actor: Option<&'a UserName>,
}

/// Lookups by a malformed id simply find nothing.
fn parse_id(id: &str) -> Option<TodoId> {
    match id.parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(error = %e, "treating malformed id as absent");
            None
        }
    }
}

impl<'a, S: KvStore + ?Sized> TodoService<'a, S> {
    pub fn new(kv: &'a S, keys: &'a KeySchema, limits: Limits) -> Self {
        Self {
            kv,
            store: TodoStore::new(kv, keys, limits),
            limits,
            actor: None,
        }
    }

    /// Attributes subsequent mutations to `user` in the logs.
    pub fn acting_as(mut self, user: &'a UserName) -> Self {
        self.actor = Some(user);
        self
    }

    fn actor(&self) -> &str {
        self.actor.map(UserName::as_str).unwrap_or("-")
    }

    /// Checks that the store answers.
    pub fn health(&self) -> TodoResult<()> {
        Ok(self.kv.ping()?)
    }

    /// Creates a todo with a fresh id and no tags.
    pub fn create(&self, title: &str, done: bool) -> TodoResult<Todo> {
        let todo = Todo::create(TodoDraft::new(title, done)?);
        self.store.save(&todo)?;
        tracing::info!(id = %todo.id(), user = self.actor(), "created todo");
        Ok(todo)
    }

    /// Reads a todo with its tags.
    pub fn get(&self, id: &str) -> TodoResult<Option<Todo>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        self.store.get(&id)
    }

    /// Replaces title and done, keeping id and tags.
    ///
    /// Last write wins: there is no version check against concurrent updates.
    pub fn update(&self, id: &str, title: &str, done: bool) -> TodoResult<Option<Todo>> {
        let draft = TodoDraft::new(title, done)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let Some(mut todo) = self.store.get(&id)? else {
            return Ok(None);
        };
        todo.apply(draft);
        self.store.save(&todo)?;
        tracing::info!(%id, user = self.actor(), "updated todo");
        Ok(Some(todo))
    }

    /// Deletes a todo and all its tag associations.
    ///
    /// Returns whether the todo existed; deleting an absent id succeeds.
    pub fn delete(&self, id: &str) -> TodoResult<bool> {
        let Some(id) = parse_id(id) else {
            return Ok(false);
        };
        let existed = self.store.delete(&id)?;
        tracing::info!(%id, existed, user = self.actor(), "deleted todo");
        Ok(existed)
    }

    /// Lists todos, capped at `limit` (default and maximum 500).
    pub fn list(&self, limit: Option<usize>) -> TodoResult<Vec<Todo>> {
        self.store.list(self.limits.resolve(limit))
    }

    /// Attaches a tag; `None` if the todo does not exist.
    pub fn add_tag(&self, id: &str, tag: &str) -> TodoResult<Option<Todo>> {
        let tag = Tag::new(tag).map_err(crate::domain::ValidationError::from)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let Some(todo) = self.store.get(&id)? else {
            return Ok(None);
        };
        let added = self.store.tags().add_tag(&id, &tag)?;
        tracing::info!(%id, %tag, added, user = self.actor(), "tagged todo");

        let mut tags = todo.tags().clone();
        tags.insert(tag);
        Ok(Some(todo.with_tags(tags)))
    }

    /// Detaches a tag; `None` if the todo does not exist.
    pub fn remove_tag(&self, id: &str, tag: &str) -> TodoResult<Option<Todo>> {
        let tag = Tag::new(tag).map_err(crate::domain::ValidationError::from)?;
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let Some(todo) = self.store.get(&id)? else {
            return Ok(None);
        };
        let removed = self.store.tags().remove_tag(&id, &tag)?;
        tracing::info!(%id, %tag, removed, user = self.actor(), "untagged todo");

        let mut tags = todo.tags().clone();
        tags.remove(&tag);
        Ok(Some(todo.with_tags(tags)))
    }

    /// Returns the tags of a todo.
    ///
    /// Unlike add/remove, an absent todo yields an empty set rather than a
    /// not-found signal.
    pub fn tags_of(&self, id: &str) -> TodoResult<BTreeSet<Tag>> {
        let Some(id) = parse_id(id) else {
            return Ok(BTreeSet::new());
        };
        self.store.tags().tags_of(&id)
    }

    /// Lists todos carrying `tag`, each with all of its tags.
    pub fn list_by_tag(&self, tag: &str, limit: Option<usize>) -> TodoResult<Vec<Todo>> {
        let tag = Tag::new(tag).map_err(crate::domain::ValidationError::from)?;
        self.store.list_by_tag(&tag, self.limits.resolve(limit))
    }
}
