//! KvStore trait, atomic batches and scan cursors.

use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors raised by the key-value store.
///
/// All of these are faults: a missing key is never an error, it is an
/// empty read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the operation timed out.
    #[error("store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    /// An I/O error occurred while preparing the store location.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A previous holder of the connection panicked.
    #[error("store connection poisoned")]
    Poisoned,
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// Atomic Batches
// ===========================================

/// A single write inside a [`Batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    /// Writes a value, replacing whatever the key held.
    Set { key: String, value: Vec<u8> },
    /// Removes a key of any type.
    Delete { key: String },
    /// Adds members to a set, ignoring ones already present.
    SetAdd { key: String, members: Vec<String> },
    /// Removes members from a set, ignoring absent ones.
    SetRemove { key: String, members: Vec<String> },
}

/// A group of writes applied all-or-nothing by [`KvStore::execute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    ops: Vec<BatchOp>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a value write.
    pub fn set(&mut self, key: impl Into<String>, value: Vec<u8>) -> &mut Self {
        self.ops.push(BatchOp::Set {
            key: key.into(),
            value,
        });
        self
    }

    /// Queues a key deletion.
    pub fn delete(&mut self, key: impl Into<String>) -> &mut Self {
        self.ops.push(BatchOp::Delete { key: key.into() });
        self
    }

    /// Queues a set insertion.
    pub fn set_add<I, S>(&mut self, key: impl Into<String>, members: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ops.push(BatchOp::SetAdd {
            key: key.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Queues a set removal.
    pub fn set_remove<I, S>(&mut self, key: impl Into<String>, members: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ops.push(BatchOp::SetRemove {
            key: key.into(),
            members: members.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

// ===========================================
// Set Scanning
// ===========================================

/// Position inside a set scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCursor {
    /// Begin at the first member.
    Start,
    /// Resume after the given member.
    After(String),
}

/// One page of a set scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    pub members: Vec<String>,
    /// `None` once the set is exhausted.
    pub next: Option<ScanCursor>,
}

// ===========================================
// KvStore Trait
// ===========================================

/// A key-value store with native sets and atomic multi-key batches.
///
/// Every method is one round trip. Multi-key reads return results
/// positionally, one entry per requested key.
pub trait KvStore: Send + Sync {
    /// Checks that the store answers.
    fn ping(&self) -> StoreResult<()>;

    /// Reads one value.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Reads many values in one round trip.
    fn mget(&self, keys: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>>;

    /// Reads a whole set; empty when the key is absent.
    fn smembers(&self, key: &str) -> StoreResult<BTreeSet<String>>;

    /// Reads many sets in one pipelined round trip.
    fn smembers_many(&self, keys: &[String]) -> StoreResult<Vec<BTreeSet<String>>>;

    /// Reads up to `count` members of a set starting at `cursor`.
    fn sscan(&self, key: &str, cursor: &ScanCursor, count: usize) -> StoreResult<ScanPage>;

    /// Applies every op in `batch` atomically.
    ///
    /// Returns the affected count per op: keys removed for `Delete`,
    /// members added or removed for set ops, `1` for `Set`.
    fn execute(&self, batch: &Batch) -> StoreResult<Vec<usize>>;
}
