//! Client-side holder of the current session id (the cookie analogue).

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{SessionError, SessionId, SessionResult};

/// A file holding one session id.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Reads the stored id; a missing or blank file means no session.
    pub fn load(&self) -> SessionResult<Option<SessionId>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(SessionId::from_token(&contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Stores `id`, creating parent directories as needed.
    pub fn save(&self, id: &SessionId) -> SessionResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs::write(&self.path, id.as_str()).map_err(|e| self.io_error(e))
    }

    /// Forgets the stored id. Clearing an absent file is not an error.
    pub fn clear(&self) -> SessionResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
