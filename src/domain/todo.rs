//! Todo record and its validated input form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::domain::validation::validate_title;
use crate::domain::{Tag, TodoId, ValidationError};

/// A todo item with its resolved tags.
///
/// `id` is immutable after creation. `title` and `done` are replaced
/// together on update. `tags` are not part of the stored record; they are
/// resolved from the tag index on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TodoRepr")]
pub struct Todo {
    id: TodoId,
    title: String,
    done: bool,
    tags: BTreeSet<Tag>,
}

/// Unvalidated wire form; deserialization goes through [`TodoDraft`].
#[derive(Deserialize)]
struct TodoRepr {
    id: TodoId,
    title: String,
    done: bool,
    #[serde(default)]
    tags: BTreeSet<Tag>,
}

impl TryFrom<TodoRepr> for Todo {
    type Error = ValidationError;

    fn try_from(repr: TodoRepr) -> Result<Self, Self::Error> {
        let draft = TodoDraft::new(repr.title, repr.done)?;
        Ok(Self::new(repr.id, draft.title, draft.done).with_tags(repr.tags))
    }
}

impl Todo {
    /// Creates a todo with no tags.
    pub fn new(id: TodoId, title: impl Into<String>, done: bool) -> Self {
        Self {
            id,
            title: title.into(),
            done,
            tags: BTreeSet::new(),
        }
    }

    /// Creates a todo with a freshly generated id from validated input.
    pub fn create(draft: TodoDraft) -> Self {
        Self::new(TodoId::generate(), draft.title, draft.done)
    }

    /// Returns the todo with its tag set replaced.
    pub fn with_tags(mut self, tags: BTreeSet<Tag>) -> Self {
        self.tags = tags;
        self
    }

    /// Replaces every mutable record field, keeping id and tags.
    pub fn apply(&mut self, draft: TodoDraft) {
        self.title = draft.title;
        self.done = draft.done;
    }

    pub fn id(&self) -> &TodoId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn done(&self) -> bool {
        self.done
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }
}

/// Validated create/update input: `{title, done}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    title: String,
    done: bool,
}

impl TodoDraft {
    /// Validates the title and builds the draft.
    ///
    /// The title is stored exactly as given once it passes validation.
    pub fn new(title: impl Into<String>, done: bool) -> Result<Self, ValidationError> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self { title, done })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn done(&self) -> bool {
        self.done
    }
}
