//! Session user name.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::ValidationError;
use crate::domain::validation::MAX_USER_NAME_LEN;

/// The name a session is logged in as.
///
/// Opaque to the todo layer, which only records it in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// Trims and validates a login name.
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyUserName);
        }
        let len = trimmed.chars().count();
        if len > MAX_USER_NAME_LEN {
            return Err(ValidationError::UserNameTooLong {
                len,
                max: MAX_USER_NAME_LEN,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
