//! Session records in the key-value store.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use ulid::Ulid;

use crate::domain::{UserName, ValidationError};
use crate::store::{Batch, KvStore, StoreError};

/// Default key namespace for sessions.
pub const DEFAULT_SESSION_NAMESPACE: &str = "sess:";

/// Default session lifetime: one day.
pub const DEFAULT_SESSION_MAX_AGE_SECS: u64 = 60 * 60 * 24;

/// Errors raised by session handling.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("corrupt session at {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: bincode::Error,
    },

    #[error("failed to encode session: {0}")]
    Encode(#[source] bincode::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Opaque session identifier handed to the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Wraps a stored id; blank input yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        (!token.is_empty()).then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    user: UserName,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Login, lookup and logout over the shared store.
pub struct SessionStore<'a, S: KvStore + ?Sized> {
    kv: &'a S,
    namespace: &'a str,
    max_age: Duration,
}

impl<'a, S: KvStore + ?Sized> SessionStore<'a, S> {
    pub fn new(kv: &'a S, namespace: &'a str, max_age_secs: u64) -> Self {
        let secs = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
        Self {
            kv,
            namespace,
            max_age: Duration::try_seconds(secs).unwrap_or(Duration::MAX),
        }
    }

    fn key(&self, id: &SessionId) -> String {
        format!("{}{}", self.namespace, id)
    }

    /// Starts a session for `name`.
    pub fn login(&self, name: &str) -> SessionResult<(SessionId, UserName)> {
        self.login_at(name, Utc::now())
    }

    pub(crate) fn login_at(
        &self,
        name: &str,
        now: DateTime<Utc>,
    ) -> SessionResult<(SessionId, UserName)> {
        let user = UserName::new(name)?;
        let record = SessionRecord {
            user: user.clone(),
            created_at: now,
            expires_at: now.checked_add_signed(self.max_age).unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        let bytes = bincode::serialize(&record).map_err(SessionError::Encode)?;

        let id = SessionId::generate();
        let mut batch = Batch::new();
        batch.set(self.key(&id), bytes);
        self.kv.execute(&batch)?;
        tracing::info!(user = %user, "logged in");
        Ok((id, user))
    }

    /// Returns the user behind a session, if it exists and has not expired.
    pub fn current_user(&self, id: &SessionId) -> SessionResult<Option<UserName>> {
        self.current_user_at(id, Utc::now())
    }

    pub(crate) fn current_user_at(
        &self,
        id: &SessionId,
        now: DateTime<Utc>,
    ) -> SessionResult<Option<UserName>> {
        let key = self.key(id);
        let Some(bytes) = self.kv.get(&key)? else {
            return Ok(None);
        };
        let record: SessionRecord =
            bincode::deserialize(&bytes).map_err(|source| SessionError::Decode { key, source })?;

        if record.expires_at <= now {
            tracing::debug!(user = %record.user, "session expired");
            self.logout(id)?;
            return Ok(None);
        }
        Ok(Some(record.user))
    }

    /// Ends a session. Ending an unknown session is not an error.
    pub fn logout(&self, id: &SessionId) -> SessionResult<()> {
        let mut batch = Batch::new();
        batch.delete(self.key(id));
        self.kv.execute(&batch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use pretty_assertions::assert_eq;

    fn sessions(kv: &SqliteStore) -> SessionStore<'_, SqliteStore> {
        SessionStore::new(kv, DEFAULT_SESSION_NAMESPACE, DEFAULT_SESSION_MAX_AGE_SECS)
    }

    #[test]
    fn login_then_current_user() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let store = sessions(&kv);

        let (id, user) = store.login("  testuser ").unwrap();

        assert_eq!(user.as_str(), "testuser");
        assert_eq!(store.current_user(&id).unwrap(), Some(user));
    }

    #[test]
    fn blank_login_is_rejected() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let err = sessions(&kv).login("   ").unwrap_err();
        assert!(matches!(
            err,
            SessionError::Validation(ValidationError::EmptyUserName)
        ));
    }

    #[test]
    fn unknown_session_has_no_user() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let id = SessionId::generate();
        assert_eq!(sessions(&kv).current_user(&id).unwrap(), None);
    }

    #[test]
    fn logout_ends_session_and_is_idempotent() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let store = sessions(&kv);
        let (id, _) = store.login("someone").unwrap();

        store.logout(&id).unwrap();
        store.logout(&id).unwrap();

        assert_eq!(store.current_user(&id).unwrap(), None);
    }

    #[test]
    fn expired_session_is_dropped() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let store = SessionStore::new(&kv, DEFAULT_SESSION_NAMESPACE, 60);
        let start = Utc::now();
        let (id, user) = store.login_at("traveller", start).unwrap();

        let within = start + Duration::seconds(59);
        assert_eq!(store.current_user_at(&id, within).unwrap(), Some(user));

        let after = start + Duration::seconds(61);
        assert_eq!(store.current_user_at(&id, after).unwrap(), None);
        assert_eq!(kv.get(&format!("sess:{id}")).unwrap(), None);
    }

    #[test]
    fn sessions_live_under_their_own_namespace() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let (id, _) = sessions(&kv).login("ns").unwrap();
        assert!(kv.get(&format!("sess:{id}")).unwrap().is_some());
    }

    #[test]
    fn corrupt_session_is_a_fault() {
        let kv = SqliteStore::open_in_memory().unwrap();
        let id = SessionId::generate();
        let mut batch = Batch::new();
        batch.set(format!("sess:{id}"), vec![0xff]);
        kv.execute(&batch).unwrap();

        assert!(matches!(
            sessions(&kv).current_user(&id),
            Err(SessionError::Decode { .. })
        ));
    }

    #[test]
    fn from_token_trims_and_rejects_blank() {
        assert_eq!(SessionId::from_token("  abc\n").unwrap().as_str(), "abc");
        assert_eq!(SessionId::from_token(" \n"), None);
    }
}
