//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Todo;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output matching the entity contract
    Json,
}

/// `{"name": ...}`; empty when nobody is logged in.
#[derive(Debug, Serialize)]
pub struct UserListing {
    pub name: String,
}

/// `{"ok": ...}` health probe result.
#[derive(Debug, Serialize)]
pub struct HealthListing {
    pub ok: bool,
}

/// `{"id": ..., "deleted": ...}` delete result.
#[derive(Debug, Serialize)]
pub struct DeleteListing {
    pub id: String,
    pub deleted: bool,
}

/// One-line human rendering of a todo.
pub fn todo_line(todo: &Todo) -> String {
    let mark = if todo.done() { "x" } else { " " };
    let mut line = format!("[{}] {}  {}", mark, todo.id(), todo.title());
    for tag in todo.tags() {
        line.push_str(" #");
        line.push_str(tag.as_str());
    }
    line
}
