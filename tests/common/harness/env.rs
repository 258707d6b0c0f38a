//! Isolated test environment with temp directory.

// Allow dead code since this is a test utility shared by several suites
#![allow(dead_code)]

use super::TodosCommand;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// The store and session file live in the directory, which is removed
/// when the TestEnv is dropped.
pub struct TestEnv {
    _temp_dir: TempDir,
    data_dir: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            data_dir,
        }
    }

    /// Creates an environment with a session already open for `name`.
    pub fn logged_in(name: &str) -> Self {
        let env = Self::new();
        env.cmd().login(name).assert().success();
        env
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the default store database.
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join("store.db")
    }

    /// Path of the session file.
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session")
    }

    /// Creates a TodosCommand configured for this test environment.
    pub fn cmd(&self) -> TodosCommand {
        TodosCommand::new().data_dir(&self.data_dir)
    }

    /// Creates a todo through the CLI and returns its id.
    pub fn create_todo(&self, title: &str) -> String {
        let todo: Value = self.cmd().create(title).format_json().output_json();
        todo["id"]
            .as_str()
            .expect("created todo has an id")
            .to_string()
    }

    /// Writes a file into the environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.data_dir.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.data_dir().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--data-dir");
        assert_eq!(args[1], env.data_dir().to_string_lossy());
    }

    #[test]
    fn test_env_login_writes_session_file() {
        let env = TestEnv::logged_in("alice");
        assert!(env.session_path().exists());
        assert!(env.store_path().exists());
    }
}
