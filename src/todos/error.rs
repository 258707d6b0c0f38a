//! Error type for todo persistence.

use thiserror::Error;

use crate::domain::ValidationError;
use crate::infra::CodecError;
use crate::store::StoreError;

/// Faults raised by the todo layer.
///
/// A missing todo is not a fault; operations that can meet one return
/// `Option` (or `bool` for delete) instead.
#[derive(Debug, Error)]
pub enum TodoError {
    /// The key-value store is unreachable or timed out.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Stored data does not parse; the store was edited from outside.
    #[error("corrupt data at {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },

    /// A record could not be encoded.
    #[error("failed to encode todo {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: CodecError,
    },

    /// Input was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl TodoError {
    pub(crate) fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            key: key.into(),
            source: CodecError::Invalid(reason.into()),
        }
    }
}

/// Result type for todo operations.
pub type TodoResult<T> = Result<T, TodoError>;
