//! Server-side sessions keyed by an opaque session id.
//!
//! The todo layer only ever sees the resulting [`UserName`](crate::domain::UserName).

mod file;
mod store;

pub use file::SessionFile;
pub use store::{
    DEFAULT_SESSION_MAX_AGE_SECS, DEFAULT_SESSION_NAMESPACE, SessionError, SessionId,
    SessionResult, SessionStore,
};
