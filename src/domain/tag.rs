//! Tag type for labelling todos.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum tag length in characters.
pub const MAX_TAG_LEN: usize = 50;

/// A label attached to todos.
///
/// Tags are flat, case-sensitive strings. Surrounding whitespace is trimmed;
/// the remainder must be 1 to 50 characters with no control characters.
///
/// # Examples
///
/// ```
/// use todos::domain::Tag;
///
/// let tag = Tag::new("  urgent ").unwrap();
/// assert_eq!(tag.as_str(), "urgent");
/// assert!(Tag::new("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

/// Error returned when parsing an invalid tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

impl Tag {
    /// Creates a new Tag from a string.
    ///
    /// # Errors
    ///
    /// Returns `ParseTagError` if:
    /// - The tag is empty or whitespace-only
    /// - The tag is longer than 50 characters after trimming
    /// - The tag contains control characters
    pub fn new(s: &str) -> Result<Self, ParseTagError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ParseTagError("tag cannot be empty".to_string()));
        }

        let len = trimmed.chars().count();
        if len > MAX_TAG_LEN {
            return Err(ParseTagError(format!(
                "tag is {} characters long; the maximum is {}",
                len, MAX_TAG_LEN
            )));
        }

        if trimmed.chars().any(char::is_control) {
            return Err(ParseTagError(format!(
                "invalid tag '{}': control characters are not allowed",
                trimmed.escape_debug()
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the tag value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tag(\"{}\")", self.0)
    }
}

impl FromStr for Tag {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
