//! Todo persistence: record store, tag index and batched reads

mod assembler;
mod error;
mod limits;
mod scan;
mod service;
mod tag_index;
mod todo_store;

pub use assembler::BatchAssembler;
pub use error::{TodoError, TodoResult};
pub use limits::{DEFAULT_LIST_LIMIT, DEFAULT_SCAN_PAGE_SIZE, Limits};
pub use service::TodoService;
pub use tag_index::TagIndex;
pub use todo_store::TodoStore;
