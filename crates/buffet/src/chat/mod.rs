//! Multi-model chat threads and their local persistence.

mod render;
mod storage;
mod store;
mod submit;
mod thread;

pub use render::{render_thread, render_turn};
pub use storage::{FileStore, MemoryStore, StorageError, StorageResult, ThreadStorage};
pub use store::{ACTIVE_KEY, ChatStore, THREADS_KEY};
pub use submit::{AggregateBackend, SubmitOutcome, submit_turn};
pub use thread::{ChatThread, DEFAULT_TITLE, ModelResponse, Turn, derive_title};
