//! Fluent wrapper around assert_cmd::Command.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use assert_cmd::Command;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Fluent wrapper around `assert_cmd::Command` for the `todos` binary.
///
/// The process environment is scrubbed of `TODOS_*` variables so a
/// developer's own configuration never leaks into a test run.
pub struct TodosCommand {
    args: Vec<String>,
    config: Option<PathBuf>,
}

impl TodosCommand {
    /// Creates a new command for the `todos` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            config: None,
        }
    }

    /// Sets `--data-dir`.
    pub fn data_dir(mut self, path: &Path) -> Self {
        self.args.push("--data-dir".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Points `TODOS_CONFIG` at `path`.
    pub fn config(mut self, path: &Path) -> Self {
        self.config = Some(path.to_path_buf());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Returns the current arguments (for testing).
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Runs the command and returns an Assert for making assertions.
    #[allow(deprecated)]
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("todos").expect("Failed to find todos binary");
        for var in ["TODOS_DATA_DIR", "TODOS_STORE", "TODOS_NAMESPACE", "TODOS_LOG"] {
            cmd.env_remove(var);
        }
        match &self.config {
            Some(path) => cmd.env("TODOS_CONFIG", path),
            None => cmd.env("TODOS_CONFIG", "/nonexistent/todos/config.toml"),
        };
        cmd.args(&self.args);
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    pub fn login(self, name: &str) -> Self {
        self.args(["login", name])
    }

    pub fn create(self, title: &str) -> Self {
        self.args(["create", title])
    }

    pub fn show(self, id: &str) -> Self {
        self.args(["show", id])
    }

    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    pub fn tag(self, id: &str, tag: &str) -> Self {
        self.args(["tag", id, tag])
    }

    pub fn by_tag(self, tag: &str) -> Self {
        self.args(["by-tag", tag])
    }

    // ===========================================
    // Format Options
    // ===========================================

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for TodosCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_runs_binary() {
        TodosCommand::new().args(["--help"]).assert().success();
    }

    #[test]
    fn test_command_shortcuts() {
        let cmd = TodosCommand::new().ls().format_json();
        assert_eq!(cmd.get_args(), ["ls", "--format", "json"]);
    }
}
