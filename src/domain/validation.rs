//! Input validation run before any store mutation.

use thiserror::Error;

use crate::domain::ParseTagError;

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum user name length in characters.
pub const MAX_USER_NAME_LEN: usize = 100;

/// A rejected input value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    #[error("title cannot be empty")]
    EmptyTitle,

    /// Title exceeds the maximum length.
    #[error("title is {len} characters long; the maximum is {max}")]
    TitleTooLong { len: usize, max: usize },

    /// Tag failed validation.
    #[error("invalid tag: {0}")]
    Tag(#[from] ParseTagError),

    /// Login name is empty or whitespace-only.
    #[error("user is required")]
    EmptyUserName,

    /// Login name exceeds the maximum length.
    #[error("user name is {len} characters long; the maximum is {max}")]
    UserNameTooLong { len: usize, max: usize },
}

/// Checks a todo title: non-empty after trimming, at most 200 characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong {
            len,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(())
}
