//! Infrastructure: record codec, key schema, logging

pub mod codec;
mod keys;
pub mod telemetry;

pub use codec::{CodecError, decode, encode};
pub use keys::{DEFAULT_NAMESPACE, KeySchema};
