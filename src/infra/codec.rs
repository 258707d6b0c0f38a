//! Binary codec for stored todo records.
//!
//! A record is one format-version byte followed by the bincode encoding of
//! `(id, title, done)`. Tags are not part of the record; they live in the
//! tag index and are resolved on read.

use bincode::Options;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Todo, TodoId, validate_title};

/// Version byte written in front of every record.
pub const FORMAT_VERSION: u8 = 1;

/// Upper bound on a decoded record, so corrupt length prefixes cannot
/// trigger huge allocations.
const MAX_RECORD_BYTES: u64 = 16 * 1024;

/// Errors produced while encoding or decoding a record.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode todo record: {0}")]
    Encode(#[source] bincode::Error),

    #[error("record is empty")]
    Empty,

    #[error("unsupported record format version {0}")]
    UnsupportedVersion(u8),

    #[error("malformed record: {0}")]
    Malformed(#[source] bincode::Error),

    #[error("invalid record: {0}")]
    Invalid(String),
}

#[derive(Serialize)]
struct RecordRef<'a> {
    id: &'a str,
    title: &'a str,
    done: bool,
}

#[derive(Deserialize)]
struct Record {
    id: String,
    title: String,
    done: bool,
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(MAX_RECORD_BYTES)
        .reject_trailing_bytes()
}

/// Encodes the record fields of a todo; tags are ignored.
pub fn encode(todo: &Todo) -> Result<Vec<u8>, CodecError> {
    let record = RecordRef {
        id: todo.id().as_str(),
        title: todo.title(),
        done: todo.done(),
    };
    let body = options().serialize(&record).map_err(CodecError::Encode)?;

    let mut bytes = Vec::with_capacity(body.len() + 1);
    bytes.push(FORMAT_VERSION);
    bytes.extend_from_slice(&body);
    Ok(bytes)
}

/// Decodes a record into a todo with an empty tag set.
pub fn decode(bytes: &[u8]) -> Result<Todo, CodecError> {
    let (&version, body) = bytes.split_first().ok_or(CodecError::Empty)?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let record: Record = options()
        .deserialize(body)
        .map_err(CodecError::Malformed)?;

    let id: TodoId = record
        .id
        .parse()
        .map_err(|e| CodecError::Invalid(format!("{e}")))?;
    validate_title(&record.title).map_err(|e| CodecError::Invalid(e.to_string()))?;

    Ok(Todo::new(id, record.title, record.done))
}
