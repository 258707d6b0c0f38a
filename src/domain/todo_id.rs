//! Opaque todo identifier, generated server-side from a ULID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// A unique identifier for todos.
///
/// New ids are 26-character ULIDs, but the identifier is opaque: any
/// non-empty string without whitespace or control characters is accepted
/// when looking a todo up, so ids written by other tools still resolve.
///
/// # Examples
///
/// ```
/// use todos::domain::TodoId;
///
/// let id = TodoId::generate();
/// assert_eq!(id.as_str().len(), 26);
///
/// let parsed: TodoId = "nonexistent-todo-id".parse().unwrap();
/// assert_eq!(parsed.as_str(), "nonexistent-todo-id");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(String);

impl TodoId {
    /// Generates a fresh identifier with the current timestamp.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TodoId(\"{}\")", self.0)
    }
}

/// Error returned when parsing an invalid todo id.
#[derive(Debug, Clone)]
pub struct ParseTodoIdError {
    value: String,
    reason: &'static str,
}

impl ParseTodoIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseTodoIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid todo id '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for ParseTodoIdError {}

impl FromStr for TodoId {
    type Err = ParseTodoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reason = if s.is_empty() {
            Some("id cannot be empty")
        } else if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("id cannot contain whitespace or control characters")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ParseTodoIdError {
                value: s.to_string(),
                reason,
            }),
            None => Ok(Self(s.to_string())),
        }
    }
}

impl Serialize for TodoId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn generate_creates_valid_ulid() {
        let id = TodoId::generate();
        let s = id.to_string();
        assert_eq!(s.len(), 26, "ULID should be 26 characters");
        assert!(Ulid::from_string(&s).is_ok());
    }

    #[test]
    fn generate_is_unique() {
        let ids: HashSet<TodoId> = (0..100).map(|_| TodoId::generate()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn parse_accepts_arbitrary_opaque_ids() {
        let id: TodoId = "nonexistent-todo-id".parse().unwrap();
        assert_eq!(id.as_str(), "nonexistent-todo-id");

        let uuid: TodoId = "0b6f0e8c-9c51-4b4e-a4f6-8d2c1d3e4f5a".parse().unwrap();
        assert_eq!(uuid.to_string(), "0b6f0e8c-9c51-4b4e-a4f6-8d2c1d3e4f5a");
    }

    #[test]
    fn parse_rejects_empty() {
        let err = "".parse::<TodoId>().unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn parse_rejects_whitespace() {
        assert!("abc def".parse::<TodoId>().is_err());
        assert!(" abc".parse::<TodoId>().is_err());
        assert!("abc\n".parse::<TodoId>().is_err());
    }

    #[test]
    fn parse_error_keeps_value() {
        let err = "a b".parse::<TodoId>().unwrap_err();
        assert_eq!(err.invalid_value(), "a b");
    }

    #[test]
    fn debug_format() {
        let id: TodoId = "abc".parse().unwrap();
        assert_eq!(format!("{:?}", id), "TodoId(\"abc\")");
    }

    #[test]
    fn serde_as_plain_string() {
        let id: TodoId = "01HQ3K5M7NXJK4QZPW8V2R6T9Y".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"01HQ3K5M7NXJK4QZPW8V2R6T9Y\"");
        let back: TodoId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn serde_rejects_invalid_on_deserialize() {
        let result: Result<TodoId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
