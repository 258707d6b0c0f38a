//! Core types: Todo, TodoId, Tag, UserName and input validation

mod tag;
mod todo;
mod todo_id;
mod user;
mod validation;

pub use tag::{MAX_TAG_LEN, ParseTagError, Tag};
pub use todo::{Todo, TodoDraft};
pub use todo_id::{ParseTodoIdError, TodoId};
pub use user::UserName;
pub use validation::{MAX_TITLE_LEN, MAX_USER_NAME_LEN, ValidationError, validate_title};
