//! Key schema mapping todos and tag memberships to store keys.

use crate::domain::TodoId;

/// Default key namespace.
pub const DEFAULT_NAMESPACE: &str = "todos:";

/// Deterministic key layout under a fixed namespace prefix.
///
/// | Entity | Key |
/// |---|---|
/// | record | `<ns>item:<id>` |
/// | primary index | `<ns>index` |
/// | forward tag set | `<ns>tags:<id>` |
/// | reverse tag set | `<ns>todos_by_tag:<tag>` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySchema {
    namespace: String,
}

impl KeySchema {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn item_key(&self, id: &TodoId) -> String {
        format!("{}item:{}", self.namespace, id)
    }

    pub fn index_key(&self) -> String {
        format!("{}index", self.namespace)
    }

    pub fn todo_tags_key(&self, id: &TodoId) -> String {
        format!("{}tags:{}", self.namespace, id)
    }

    /// Takes the raw tag text so stale or hand-edited members can still be
    /// addressed during cleanup.
    pub fn tag_todos_key(&self, tag: &str) -> String {
        format!("{}todos_by_tag:{}", self.namespace, tag)
    }
}

impl Default for KeySchema {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}
