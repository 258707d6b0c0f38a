//! Command handlers for the CLI.

mod session;
mod tags;
mod todos;


use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::io::Write;
use thiserror::Error;

use crate::cli::config::Settings;
use crate::cli::output::todo_line;
use crate::domain::{Todo, UserName};
use crate::infra::KeySchema;
use crate::session::{SessionFile, SessionStore};
use crate::store::SqliteStore;
use crate::todos::TodoService;

// Re-export public items
pub use session::{handle_health, handle_login, handle_logout, handle_whoami};
pub use tags::{handle_by_tag, handle_tag, handle_tags, handle_untag};
pub use todos::{handle_create, handle_delete, handle_list, handle_show, handle_update};

// ===========================================
// Shared Context
// ===========================================

/// Signals an absent todo; the binary maps it to its own exit code.
#[derive(Debug, Error)]
#[error("todo not found: {id}")]
pub struct NotFound {
    pub id: String,
}

/// Everything a command needs, built once per process.
pub struct AppContext {
    pub settings: Settings,
    pub store: SqliteStore,
    pub keys: KeySchema,
}

impl AppContext {
    /// Opens the configured store.
    pub fn open(settings: Settings) -> Result<Self> {
        let store = SqliteStore::open_with_timeout(&settings.store_path, settings.store_timeout)
            .with_context(|| {
                format!("failed to open store at {}", settings.store_path.display())
            })?;
        Ok(Self::with_store(settings, store))
    }

    pub fn with_store(settings: Settings, store: SqliteStore) -> Self {
        let keys = KeySchema::new(settings.namespace.clone());
        Self {
            settings,
            store,
            keys,
        }
    }

    pub fn service(&self) -> TodoService<'_, SqliteStore> {
        TodoService::new(&self.store, &self.keys, self.settings.limits)
    }

    pub fn sessions(&self) -> SessionStore<'_, SqliteStore> {
        SessionStore::new(
            &self.store,
            &self.settings.session_namespace,
            self.settings.session_max_age_secs,
        )
    }

    pub fn session_file(&self) -> SessionFile {
        SessionFile::new(self.settings.session_file())
    }

    /// Returns the logged-in user or fails with a hint to log in.
    pub fn current_user(&self) -> Result<Option<UserName>> {
        let Some(id) = self.session_file().load()? else {
            return Ok(None);
        };
        Ok(self.sessions().current_user(&id)?)
    }

    pub fn require_user(&self) -> Result<UserName> {
        match self.current_user()? {
            Some(user) => Ok(user),
            None => bail!("not logged in; run `todos login <name>` first"),
        }
    }
}

// ===========================================
// Shared Utilities
// ===========================================

pub(crate) fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

pub(crate) fn write_todos(out: &mut dyn Write, todos: &[Todo]) -> Result<()> {
    if todos.is_empty() {
        writeln!(out, "No todos found.")?;
    }
    for todo in todos {
        writeln!(out, "{}", todo_line(todo))?;
    }
    Ok(())
}
