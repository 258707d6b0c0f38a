//! Configuration file support and settings resolution.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::infra::DEFAULT_NAMESPACE;
use crate::session::{DEFAULT_SESSION_MAX_AGE_SECS, DEFAULT_SESSION_NAMESPACE};
use crate::todos::{DEFAULT_LIST_LIMIT, DEFAULT_SCAN_PAGE_SIZE, Limits};

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "TODOS_CONFIG";

/// Default store busy timeout in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5000;

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key namespace prefix for todo data
    pub namespace: Option<String>,

    /// Store database path
    pub store: Option<PathBuf>,

    /// Directory holding the store and session file
    pub data_dir: Option<PathBuf>,

    /// Members read per index scan round trip
    pub scan_page_size: Option<usize>,

    /// Default and maximum number of todos per listing
    pub list_limit: Option<usize>,

    /// Key namespace prefix for sessions
    pub session_namespace: Option<String>,

    /// Session lifetime in seconds
    pub session_max_age_secs: Option<u64>,

    /// How long to wait on a locked store before failing
    pub store_timeout_ms: Option<u64>,

    /// Default log filter directive
    pub log: Option<String>,
}

/// Values given on the command line, highest precedence.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub store: Option<PathBuf>,
    pub namespace: Option<String>,
}

/// Fully resolved process-wide settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub namespace: String,
    pub data_dir: PathBuf,
    pub store_path: PathBuf,
    pub limits: Limits,
    pub session_namespace: String,
    pub session_max_age_secs: u64,
    pub store_timeout: Duration,
    pub log: String,
}

impl Settings {
    /// File holding the current session id.
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join("session")
    }
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, defaulting when it is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$TODOS_CONFIG` if set, else `~/.config/todos/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todos")
            .join("config.toml")
    }

    /// Resolves settings against the process environment.
    pub fn resolve(&self, cli: &Overrides) -> Settings {
        self.resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves settings.
    ///
    /// Precedence order:
    /// 1. CLI flags
    /// 2. `TODOS_*` environment variables
    /// 3. Config file
    /// 4. Built-in defaults
    pub fn resolve_with(&self, cli: &Overrides, env: impl Fn(&str) -> Option<String>) -> Settings {
        let data_dir = cli
            .data_dir
            .clone()
            .or_else(|| env("TODOS_DATA_DIR").map(PathBuf::from))
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(default_data_dir);

        let store_path = cli
            .store
            .clone()
            .or_else(|| env("TODOS_STORE").map(PathBuf::from))
            .or_else(|| self.store.clone())
            .unwrap_or_else(|| data_dir.join("store.db"));

        let namespace = cli
            .namespace
            .clone()
            .or_else(|| env("TODOS_NAMESPACE"))
            .or_else(|| self.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());

        let limits = Limits {
            scan_page_size: self.scan_page_size.unwrap_or(DEFAULT_SCAN_PAGE_SIZE).max(1),
            list_limit: self
                .list_limit
                .unwrap_or(DEFAULT_LIST_LIMIT)
                .clamp(1, DEFAULT_LIST_LIMIT),
        };

        Settings {
            namespace,
            data_dir,
            store_path,
            limits,
            session_namespace: self
                .session_namespace
                .clone()
                .unwrap_or_else(|| DEFAULT_SESSION_NAMESPACE.to_string()),
            session_max_age_secs: self
                .session_max_age_secs
                .unwrap_or(DEFAULT_SESSION_MAX_AGE_SECS),
            store_timeout: Duration::from_millis(
                self.store_timeout_ms.unwrap_or(DEFAULT_STORE_TIMEOUT_MS),
            ),
            log: self.log.clone().unwrap_or_else(|| "warn".to_string()),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todos")
}
